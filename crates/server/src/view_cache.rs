//! Cached JSON read views and their invalidation.
//!
//! Public gym pages and admin dashboards are cached by logical path. Every
//! successful mutation revalidates the paths that display what it changed,
//! so readers see the change on their next request. The per-user account
//! view is never cached.
//!
//! Entries are stamped with the day they were loaded and ignored on any
//! later day, because order lists and analytics derive `expired` from it.

use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache;
use serde::Serialize;
use serde_json::Value;

use gymhub_core::GymId;

/// Upper bound on cached views.
const MAX_VIEWS: u64 = 10_000;

/// A cacheable read view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Public gym listing.
    GymList,
    /// Public gym page with its plans.
    Gym(GymId),
    /// Members-only events of a gym.
    GymSocial(GymId),
    GymAdminMemberships(GymId),
    GymAdminOrders(GymId),
    GymAdminEvents(GymId),
    SuperAdminGyms,
    SuperAdminUsers,
    SuperAdminAdmins,
    Analytics,
}

impl View {
    /// Every view that shows data of one gym.
    #[must_use]
    pub const fn all_for_gym(gym_id: GymId) -> [Self; 5] {
        [
            Self::Gym(gym_id),
            Self::GymSocial(gym_id),
            Self::GymAdminMemberships(gym_id),
            Self::GymAdminOrders(gym_id),
            Self::GymAdminEvents(gym_id),
        ]
    }

    /// Cache key of the view.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::GymList => "/gyms".to_owned(),
            Self::Gym(id) => format!("/gyms/{id}"),
            Self::GymSocial(id) => format!("/gyms/{id}/social"),
            Self::GymAdminMemberships(id) => format!("/gym-admin/{id}/memberships"),
            Self::GymAdminOrders(id) => format!("/gym-admin/{id}/orders"),
            Self::GymAdminEvents(id) => format!("/gym-admin/{id}/events"),
            Self::SuperAdminGyms => "/superadmin/gyms".to_owned(),
            Self::SuperAdminUsers => "/superadmin/users".to_owned(),
            Self::SuperAdminAdmins => "/superadmin/admins".to_owned(),
            Self::Analytics => "/superadmin/analytics".to_owned(),
        }
    }
}

#[derive(Clone)]
struct Entry {
    loaded_on: NaiveDate,
    value: Value,
}

/// In-memory view cache shared by all handlers.
#[derive(Clone)]
pub struct ViewCache {
    cache: Cache<String, Entry>,
}

impl ViewCache {
    /// Create a cache whose entries live at most `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_VIEWS)
            .time_to_live(ttl)
            .support_invalidation_closures()
            .build();

        Self { cache }
    }

    /// Cached JSON of a view, if it was loaded `today` and is still fresh.
    pub async fn get(&self, view: &View, today: NaiveDate) -> Option<Value> {
        self.cache
            .get(&view.path())
            .await
            .filter(|entry| entry.loaded_on == today)
            .map(|entry| entry.value)
    }

    /// Serialize and cache a view loaded on `today`.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if the data cannot be serialized.
    pub async fn store<T: Serialize>(
        &self,
        view: &View,
        data: &T,
        today: NaiveDate,
    ) -> Result<Value, serde_json::Error> {
        let value = serde_json::to_value(data)?;
        let entry = Entry {
            loaded_on: today,
            value: value.clone(),
        };
        self.cache.insert(view.path(), entry).await;
        Ok(value)
    }

    /// Drop the given views.
    pub async fn revalidate(&self, views: &[View]) {
        for view in views {
            self.cache.invalidate(&view.path()).await;
        }
        tracing::debug!(?views, "Views revalidated");
    }

    /// Drop every gym's order list.
    ///
    /// Used when a user's name changes, since order lists show it.
    pub fn revalidate_order_lists(&self) {
        let result = self
            .cache
            .invalidate_entries_if(|path, _| path.starts_with("/gym-admin/") && path.ends_with("/orders"));
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to revalidate order lists");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_paths() {
        let gym = GymId::new(3);
        assert_eq!(View::GymList.path(), "/gyms");
        assert_eq!(View::Gym(gym).path(), "/gyms/3");
        assert_eq!(View::GymSocial(gym).path(), "/gyms/3/social");
        assert_eq!(View::GymAdminOrders(gym).path(), "/gym-admin/3/orders");
        assert_eq!(View::Analytics.path(), "/superadmin/analytics");
    }

    #[test]
    fn test_all_for_gym_paths_are_distinct() {
        let paths: std::collections::HashSet<_> = View::all_for_gym(GymId::new(1))
            .iter()
            .map(View::path)
            .collect();
        assert_eq!(paths.len(), 5);
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[tokio::test]
    async fn test_store_then_revalidate() {
        let views = ViewCache::new(Duration::from_secs(60));
        let gym = View::Gym(GymId::new(1));
        let other = View::Gym(GymId::new(2));

        views.store(&gym, &json!({"name": "Iron Temple"}), day(1)).await.unwrap();
        views.store(&other, &json!({"name": "Lift Co"}), day(1)).await.unwrap();
        assert_eq!(
            views.get(&gym, day(1)).await,
            Some(json!({"name": "Iron Temple"}))
        );

        views.revalidate(&[gym]).await;
        assert_eq!(views.get(&gym, day(1)).await, None);
        assert!(views.get(&other, day(1)).await.is_some());
    }

    #[tokio::test]
    async fn test_entries_expire_at_day_change() {
        let views = ViewCache::new(Duration::from_secs(3600));
        let orders = View::GymAdminOrders(GymId::new(4));

        views
            .store(&orders, &json!([{"status": "active"}]), day(10))
            .await
            .unwrap();
        assert!(views.get(&orders, day(10)).await.is_some());
        assert_eq!(views.get(&orders, day(11)).await, None);
    }

    #[tokio::test]
    async fn test_revalidate_order_lists() {
        let views = ViewCache::new(Duration::from_secs(60));
        let orders = View::GymAdminOrders(GymId::new(1));
        let events = View::GymAdminEvents(GymId::new(1));

        views.store(&orders, &json!([]), day(1)).await.unwrap();
        views.store(&events, &json!([]), day(1)).await.unwrap();
        views.revalidate_order_lists();
        views.cache.run_pending_tasks().await;

        assert_eq!(views.get(&orders, day(1)).await, None);
        assert!(views.get(&events, day(1)).await.is_some());
    }
}
