use chrono::{DateTime, Utc};

use crate::{Goal, Status};

/// Goals ordered by people target, ascending. Ties keep their original order.
pub fn goals_by_people(goals: &[Goal]) -> Vec<Goal> {
    let mut sorted = goals.to_vec();
    sorted.sort_by_key(|goal| goal.people);
    sorted
}

/// The goal with the highest people target, which both bars measure against.
pub fn binding_goal(goals: &[Goal]) -> Option<Goal> {
    goals_by_people(goals).pop()
}

/// Time left until the campaign ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Running { days: i64, hours: i64, minutes: i64 },
    Ended,
}

impl Countdown {
    /// Counts the minute boundaries between `now` and `end` and splits them into
    /// days, hours and minutes.
    pub fn between(now: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if end <= now {
            return Countdown::Ended;
        }

        let total_minutes = end.timestamp().div_euclid(60) - now.timestamp().div_euclid(60);
        Countdown::Running {
            days: total_minutes / 60 / 24,
            hours: (total_minutes / 60) % 24,
            minutes: total_minutes % 60,
        }
    }
}

/// Which figure a progress bar measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    People,
    Money,
}

impl Accessor {
    pub fn goal(&self, goal: &Goal) -> u64 {
        match self {
            Accessor::People => goal.people,
            Accessor::Money => goal.money,
        }
    }

    pub fn status(&self, status: &Status) -> u64 {
        match self {
            Accessor::People => status.people,
            Accessor::Money => status.money,
        }
    }
}

/// A goal position on the bar.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalMarker {
    pub value: u64,
    /// Position in `[0, 1]` along the bar.
    pub position: f64,
    pub visible: bool,
    pub description: Option<String>,
}

/// Geometry of one progress bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarModel {
    pub value: u64,
    pub maximum: u64,
    /// Filled share of the bar in `[0, 1]`.
    pub fill: f64,
    pub markers: Vec<GoalMarker>,
}

impl BarModel {
    /// `goals` must already be sorted with [`goals_by_people`]; the last one is the
    /// binding goal and its marker only shows when `show_last` is set.
    pub fn new(goals: &[Goal], status: &Status, accessor: Accessor, show_last: bool) -> Self {
        let value = accessor.status(status);
        let target = goals.last().map(|goal| accessor.goal(goal)).unwrap_or(0);
        let maximum = target.max(value);

        let ratio = |part: u64| {
            if maximum == 0 {
                0.0
            } else {
                (part as f64 / maximum as f64).clamp(0.0, 1.0)
            }
        };

        let last = goals.len().saturating_sub(1);
        let markers = goals
            .iter()
            .enumerate()
            .map(|(i, goal)| {
                let goal_value = accessor.goal(goal);
                GoalMarker {
                    value: goal_value,
                    position: ratio(goal_value),
                    visible: i != last || show_last,
                    description: goal.description.clone(),
                }
            })
            .collect();

        Self {
            value,
            maximum,
            fill: ratio(value),
            markers,
        }
    }

    /// Fill as a CSS percentage.
    pub fn fill_percent(&self) -> f64 {
        self.fill * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn goal(people: u64, money: u64) -> Goal {
        Goal {
            people,
            money,
            description: None,
        }
    }

    #[test]
    fn test_binding_goal_is_highest_people_target() {
        let goals = vec![goal(3000, 75_000_000), goal(10000, 100_000_000), goal(5000, 200_000_000)];

        assert_eq!(binding_goal(&goals), Some(goal(10000, 100_000_000)));
        let sorted: Vec<u64> = goals_by_people(&goals).iter().map(|g| g.people).collect();
        assert_eq!(sorted, vec![3000, 5000, 10000]);
        assert_eq!(binding_goal(&[]), None);
    }

    #[test]
    fn test_binding_goal_any_order() {
        let goals = vec![goal(2, 0), goal(7, 0), goal(1, 0), goal(5, 0)];
        for rotation in 0..goals.len() {
            let mut rotated = goals.clone();
            rotated.rotate_left(rotation);
            assert_eq!(binding_goal(&rotated).map(|g| g.people), Some(7));
        }
    }

    #[test]
    fn test_countdown_ninety_minutes() {
        let now = Utc.with_ymd_and_hms(2017, 4, 26, 10, 0, 0).unwrap();
        let end = now + Duration::minutes(90);

        assert_eq!(
            Countdown::between(now, end),
            Countdown::Running { days: 0, hours: 1, minutes: 30 }
        );
    }

    #[test]
    fn test_countdown_days() {
        let now = Utc.with_ymd_and_hms(2017, 4, 26, 10, 0, 0).unwrap();
        let end = now + Duration::days(3) + Duration::hours(5) + Duration::minutes(7);

        assert_eq!(
            Countdown::between(now, end),
            Countdown::Running { days: 3, hours: 5, minutes: 7 }
        );
    }

    #[test]
    fn test_countdown_counts_minute_boundaries() {
        let now = Utc.with_ymd_and_hms(2017, 4, 26, 10, 0, 59).unwrap();
        let end = Utc.with_ymd_and_hms(2017, 4, 26, 10, 1, 1).unwrap();

        assert_eq!(
            Countdown::between(now, end),
            Countdown::Running { days: 0, hours: 0, minutes: 1 }
        );
    }

    #[test]
    fn test_countdown_ended() {
        let now = Utc.with_ymd_and_hms(2017, 6, 1, 0, 0, 0).unwrap();

        assert_eq!(Countdown::between(now, now - Duration::minutes(1)), Countdown::Ended);
        assert_eq!(Countdown::between(now, now), Countdown::Ended);
    }

    #[test]
    fn test_bar_model() {
        let goals = goals_by_people(&[goal(4000, 80_000), goal(2000, 40_000)]);
        let status = Status {
            people: 1000,
            money: 60_000,
        };

        let people = BarModel::new(&goals, &status, Accessor::People, false);
        assert_eq!(people.maximum, 4000);
        assert_eq!(people.fill, 0.25);
        assert_eq!(people.markers[0].position, 0.5);
        assert!(people.markers[0].visible);
        assert!(!people.markers[1].visible);

        let shown = BarModel::new(&goals, &status, Accessor::People, true);
        assert!(shown.markers[1].visible);

        let money = BarModel::new(&goals, &status, Accessor::Money, false);
        assert_eq!(money.fill_percent(), 75.0);
    }

    #[test]
    fn test_bar_model_keeps_goals_with_equal_values() {
        let goals = goals_by_people(&[goal(2000, 50_000), goal(4000, 50_000)]);
        let status = Status {
            people: 500,
            money: 10_000,
        };

        let money = BarModel::new(&goals, &status, Accessor::Money, true);
        assert_eq!(money.markers.len(), 2);
        assert_eq!(money.markers[0].value, money.markers[1].value);
        assert_eq!(money.markers[0].position, 1.0);
    }

    #[test]
    fn test_bar_model_past_goal() {
        let goals = vec![goal(100, 0)];
        let status = Status {
            people: 150,
            money: 0,
        };

        let bar = BarModel::new(&goals, &status, Accessor::People, true);
        assert_eq!(bar.maximum, 150);
        assert_eq!(bar.fill, 1.0);

        let money = BarModel::new(&goals, &status, Accessor::Money, true);
        assert_eq!(money.fill, 0.0);
    }
}
