use std::collections::HashSet;
use std::sync::Arc;

mod common;
use common::{memory_service, token};

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn racing_fetches_deliver_each_note_exactly_once() {
    let senders: Vec<String> = (0..12).map(|i| format!("sender{i}")).collect();
    let mut users: Vec<&str> = senders.iter().map(String::as_str).collect();
    users.push("inbox");
    let service = Arc::new(memory_service(&users));

    for name in &senders {
        service
            .send(&token(name), "inbox", &format!("note from {name}"))
            .await
            .unwrap();
    }

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.fetch(&token("inbox")).await.unwrap()
        }));
    }

    let mut seen = Vec::new();
    for handle in handles {
        seen.extend(handle.await.unwrap());
    }

    // The union across racing drains must equal one sequential drain:
    // every note present, none twice.
    assert_eq!(seen.len(), 12);
    let seen_senders: HashSet<&str> = seen.iter().map(|note| note.sender.as_str()).collect();
    assert_eq!(seen_senders.len(), 12);

    assert!(service.fetch(&token("inbox")).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn racing_resends_leave_exactly_one_note_for_the_pair() {
    let service = Arc::new(memory_service(&["alice", "bob"]));

    let mut handles = Vec::new();
    for i in 0..16 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service
                .send(&token("alice"), "bob", &format!("body {i}"))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let inbox = service.fetch(&token("bob")).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert!(inbox[0].body.starts_with("body "));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_sends_to_distinct_pairs_do_not_interfere() {
    let senders: Vec<String> = (0..8).map(|i| format!("writer{i}")).collect();
    let mut users: Vec<&str> = senders.iter().map(String::as_str).collect();
    users.push("inbox");
    let service = Arc::new(memory_service(&users));

    let mut handles = Vec::new();
    for name in senders.clone() {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service
                .send(&token(&name), "inbox", &format!("from {name}"))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let inbox = service.fetch(&token("inbox")).await.unwrap();
    assert_eq!(inbox.len(), senders.len());
}
