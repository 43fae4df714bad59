//! Per-user notification feed. Strictly scoped to the calling user; other
//! users' entries read as missing.

use chrono::Utc;

use super::domain::{
    AuthenticatedUser, Notification, NotificationId, NotificationKind, UserId,
};
use super::repository::{MarketplaceStore, NewNotification};
use super::{Marketplace, MarketplaceError};

impl<S> Marketplace<S>
where
    S: MarketplaceStore,
{
    /// The caller's feed, newest first.
    pub fn notifications(
        &self,
        user: &AuthenticatedUser,
    ) -> Result<Vec<Notification>, MarketplaceError> {
        let mut feed = self.store().notifications_for_user(user.id)?;
        feed.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(feed)
    }

    pub fn mark_notification_read(
        &self,
        user: &AuthenticatedUser,
        id: NotificationId,
    ) -> Result<(), MarketplaceError> {
        let mut notification = self.owned_notification(user, id)?;
        if !notification.read {
            notification.read = true;
            self.store().update_notification(notification)?;
        }
        Ok(())
    }

    /// Marks every unread entry of the caller read; returns how many changed.
    pub fn mark_all_notifications_read(
        &self,
        user: &AuthenticatedUser,
    ) -> Result<usize, MarketplaceError> {
        let mut marked = 0;
        for notification in self.store().notifications_for_user(user.id)? {
            if notification.read {
                continue;
            }
            let mut notification = notification;
            notification.read = true;
            self.store().update_notification(notification)?;
            marked += 1;
        }
        Ok(marked)
    }

    pub fn delete_notification(
        &self,
        user: &AuthenticatedUser,
        id: NotificationId,
    ) -> Result<(), MarketplaceError> {
        self.owned_notification(user, id)?;
        self.store().delete_notification(id)?;
        Ok(())
    }

    /// Appends a feed entry for lifecycle events.
    pub(crate) fn notify(
        &self,
        user_id: UserId,
        kind: NotificationKind,
        message: String,
        action_url: String,
    ) -> Result<Notification, MarketplaceError> {
        Ok(self.store().insert_notification(NewNotification {
            user_id,
            message,
            kind,
            action_url,
            created_at: Utc::now(),
        })?)
    }

    fn owned_notification(
        &self,
        user: &AuthenticatedUser,
        id: NotificationId,
    ) -> Result<Notification, MarketplaceError> {
        match self.store().fetch_notification(id)? {
            Some(notification) if notification.user_id == user.id => Ok(notification),
            _ => Err(MarketplaceError::NotFound),
        }
    }
}
