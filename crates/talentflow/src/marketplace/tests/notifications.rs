use super::common::*;
use crate::marketplace::domain::{NotificationId, NotificationKind};
use crate::marketplace::MarketplaceError;

#[test]
fn feed_is_scoped_and_newest_first() {
    let marketplace = marketplace();
    let first = candidate(&marketplace, "candidate1", "Tariro Moyo");
    let second = candidate(&marketplace, "candidate2", "Kuda Ncube");

    marketplace
        .notify(
            first.id,
            NotificationKind::General,
            "older".to_string(),
            String::new(),
        )
        .expect("notified");
    marketplace
        .notify(
            first.id,
            NotificationKind::General,
            "newer".to_string(),
            String::new(),
        )
        .expect("notified");
    marketplace
        .notify(
            second.id,
            NotificationKind::General,
            "other feed".to_string(),
            String::new(),
        )
        .expect("notified");

    let feed = marketplace.notifications(&first).expect("feed");
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].message, "newer");
    assert_eq!(feed[1].message, "older");
}

#[test]
fn mark_read_is_scoped_to_the_owner() {
    let marketplace = marketplace();
    let owner = candidate(&marketplace, "candidate1", "Tariro Moyo");
    let other = candidate(&marketplace, "candidate2", "Kuda Ncube");
    let notification = marketplace
        .notify(
            owner.id,
            NotificationKind::General,
            "hello".to_string(),
            String::new(),
        )
        .expect("notified");

    match marketplace.mark_notification_read(&other, notification.id) {
        Err(MarketplaceError::NotFound) => {}
        other => panic!("expected not found, got {other:?}"),
    }

    marketplace
        .mark_notification_read(&owner, notification.id)
        .expect("marked");
    let feed = marketplace.notifications(&owner).expect("feed");
    assert!(feed[0].read);
}

#[test]
fn mark_read_on_missing_id_is_not_found() {
    let marketplace = marketplace();
    let owner = candidate(&marketplace, "candidate1", "Tariro Moyo");

    match marketplace.mark_notification_read(&owner, NotificationId(7)) {
        Err(MarketplaceError::NotFound) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn mark_all_touches_only_unread_entries() {
    let marketplace = marketplace();
    let owner = candidate(&marketplace, "candidate1", "Tariro Moyo");
    let read = marketplace
        .notify(
            owner.id,
            NotificationKind::General,
            "already read".to_string(),
            String::new(),
        )
        .expect("notified");
    marketplace
        .mark_notification_read(&owner, read.id)
        .expect("marked");
    marketplace
        .notify(
            owner.id,
            NotificationKind::General,
            "unread".to_string(),
            String::new(),
        )
        .expect("notified");

    let marked = marketplace
        .mark_all_notifications_read(&owner)
        .expect("marked all");
    assert_eq!(marked, 1);
    assert!(marketplace
        .notifications(&owner)
        .expect("feed")
        .iter()
        .all(|n| n.read));
}

#[test]
fn delete_is_scoped_to_the_owner() {
    let marketplace = marketplace();
    let owner = candidate(&marketplace, "candidate1", "Tariro Moyo");
    let other = candidate(&marketplace, "candidate2", "Kuda Ncube");
    let notification = marketplace
        .notify(
            owner.id,
            NotificationKind::StatusUpdate,
            "gone soon".to_string(),
            String::new(),
        )
        .expect("notified");

    match marketplace.delete_notification(&other, notification.id) {
        Err(MarketplaceError::NotFound) => {}
        other => panic!("expected not found, got {other:?}"),
    }

    marketplace
        .delete_notification(&owner, notification.id)
        .expect("deleted");
    assert!(marketplace.notifications(&owner).expect("feed").is_empty());
}
