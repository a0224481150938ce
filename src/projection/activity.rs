//! Selection of the most relevant activity of a deal.
//!
//! The latest undone activity wins; with none undone, the latest done one.
//! "Latest" compares the raw `due_date` strings, so a missing date ranks
//! lowest and ties keep upstream order.

use serde::Serialize;

use crate::crm::Activity;

/// Due date and time of the selected activity, empty when there is none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityProjection {
    pub due_date: String,
    pub due_time: String,
}

impl From<Option<&Activity>> for ActivityProjection {
    fn from(activity: Option<&Activity>) -> Self {
        match activity {
            Some(a) => Self {
                due_date: a.due_date.clone().unwrap_or_default(),
                due_time: a.due_time.clone().unwrap_or_default(),
            },
            None => Self::default(),
        }
    }
}

/// Pick the activity a form should show.
pub fn select_activity(activities: &[Activity]) -> Option<&Activity> {
    latest(activities, false).or_else(|| latest(activities, true))
}

fn latest(activities: &[Activity], done: bool) -> Option<&Activity> {
    activities
        .iter()
        .filter(|a| a.done == done)
        .fold(None, |best: Option<&Activity>, a| match best {
            Some(b) if due(b) >= due(a) => Some(b),
            _ => Some(a),
        })
}

fn due(activity: &Activity) -> &str {
    activity.due_date.as_deref().unwrap_or_default()
}
