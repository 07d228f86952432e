mod common;

use std::sync::Arc;
use std::thread;

use mud_engine::SessionRegistry;
use mud_engine::session::SessionError;
use uuid::Uuid;

fn registry() -> SessionRegistry {
    SessionRegistry::from_data(&common::game_data())
}

#[test]
fn concurrent_get_or_create_yields_one_game() {
    let registry = registry();
    let id = Uuid::new_v4();

    let games: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| registry.get_or_create(id).unwrap())).collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert_eq!(registry.len(), 1);
    assert!(games.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

#[test]
fn sessions_run_in_parallel_without_sharing_state() {
    let registry = registry();
    let ids: Vec<_> = (0..4).map(|_| registry.create_session().unwrap().session_id).collect();

    thread::scope(|scope| {
        for (n, id) in ids.iter().enumerate() {
            let registry = &registry;
            scope.spawn(move || {
                let step = if n % 2 == 0 { "move north" } else { "move east" };
                let reply = registry.submit(*id, step).unwrap();
                assert!(!reply.rejected, "{}", reply.text);
                registry.submit(*id, "take سیب").unwrap();
            });
        }
    });

    for (n, id) in ids.iter().enumerate() {
        let snapshot = registry.snapshot(*id).unwrap();
        let expected = if n % 2 == 0 { "garden" } else { "dining" };
        assert_eq!(snapshot["room"]["room_id"], expected);
        let carrying = snapshot["inventory"].as_array().map_or(0, Vec::len);
        assert_eq!(carrying, usize::from(n % 2 == 0));
    }
}

#[test]
fn reply_carries_text_and_snapshot() {
    let registry = registry();
    let opening = registry.create_session().unwrap();
    assert!(opening.text.contains("Library"));
    assert_eq!(opening.snapshot["room"]["room_id"], "library");

    let reply = registry.submit(opening.session_id, "talk پیرمرد").unwrap();
    let learned = reply.snapshot["learned_words"].as_array().unwrap();
    assert_eq!(learned.len(), 4);

    let rejected = registry.submit(opening.session_id, "eat میز").unwrap();
    assert!(rejected.rejected);
}

#[test]
fn removed_sessions_are_unknown() {
    let registry = registry();
    let id = registry.create_session().unwrap().session_id;
    assert!(registry.remove(id).unwrap());
    assert!(matches!(registry.submit(id, "look"), Err(SessionError::UnknownSession(missing)) if missing == id));
    assert!(matches!(registry.snapshot(id), Err(SessionError::UnknownSession(_))));
}
