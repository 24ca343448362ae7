//! Client-side filtering and pagination of already-loaded lists

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::schemas::{Client, ClientStatus, Sprint};

/// Creation-date window for the client list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    All,
    Last30Days,
    Last90Days,
}

impl TimeWindow {
    fn days(&self) -> Option<i64> {
        match self {
            TimeWindow::All => None,
            TimeWindow::Last30Days => Some(30),
            TimeWindow::Last90Days => Some(90),
        }
    }
}

impl std::str::FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TimeWindow::All),
            "30d" => Ok(TimeWindow::Last30Days),
            "90d" => Ok(TimeWindow::Last90Days),
            _ => Err(format!("Unknown time window: {} (expected all, 30d or 90d)", s)),
        }
    }
}

/// Filters applied to the client list
#[derive(Debug, Clone, Default)]
pub struct ClientFilter {
    /// Free-text term; empty matches everything
    pub search: String,
    pub status: Option<ClientStatus>,
    pub window: TimeWindow,
}

impl ClientFilter {
    /// Whether a single client passes every filter
    pub fn matches(&self, client: &Client, now: DateTime<Utc>) -> bool {
        let term = self.search.trim().to_lowercase();
        if !term.is_empty() {
            let status = client.status.to_string();
            let fields = [
                client.name.as_str(),
                client.email.as_str(),
                client.phone.as_deref().unwrap_or(""),
                status.as_str(),
            ];
            // Each field on its own; a term never spans two fields
            if !fields.iter().any(|f| f.to_lowercase().contains(&term)) {
                return false;
            }
        }
        if let Some(days) = self.window.days() {
            if client.created_at < now - Duration::days(days) {
                return false;
            }
        }
        self.status.map_or(true, |status| client.status == status)
    }
}

/// Clients passing `filter`, in their original order
pub fn filter_clients<'a>(
    clients: &'a [Client],
    filter: &ClientFilter,
    now: DateTime<Utc>,
) -> Vec<&'a Client> {
    clients.iter().filter(|c| filter.matches(c, now)).collect()
}

/// Sprints belonging to `milestone`; all sprints when none is selected
pub fn filter_sprints_by_milestone(sprints: &[Sprint], milestone: Option<i64>) -> Vec<&Sprint> {
    sprints
        .iter()
        .filter(|s| milestone.map_or(true, |m| s.milestone == m))
        .collect()
}

/// One page of a list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice out page `page` (1-based). Out-of-range pages are empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let start = page.saturating_sub(1).saturating_mul(per_page);
    let slice = if page == 0 || start >= items.len() {
        Vec::new()
    } else {
        items[start..(start + per_page).min(items.len())].to_vec()
    };

    Page {
        items: slice,
        page,
        total_pages,
        total_items: items.len(),
    }
}

/// Counts shown above the client list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClientMetrics {
    pub total: usize,
    pub active: usize,
    pub prospect: usize,
    pub inactive: usize,
}

impl ClientMetrics {
    pub fn from_clients(clients: &[Client]) -> Self {
        clients.iter().fold(
            ClientMetrics {
                total: clients.len(),
                ..Default::default()
            },
            |mut metrics, client| {
                match client.status {
                    ClientStatus::Active => metrics.active += 1,
                    ClientStatus::Prospect => metrics.prospect += 1,
                    ClientStatus::Inactive => metrics.inactive += 1,
                }
                metrics
            },
        )
    }
}
