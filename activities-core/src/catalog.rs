//! Activities offered at startup. The set is fixed for the lifetime of the
//! process; only rosters change.

use crate::models::Activity;

pub fn seed_activities() -> Vec<(String, Activity)> {
    vec![
        entry(
            "Chess Club",
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
            &["michael@mergington.edu", "daniel@mergington.edu"],
        ),
        entry(
            "Programming Class",
            "Learn programming fundamentals and build software projects",
            "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
            20,
            &["emma@mergington.edu", "sophia@mergington.edu"],
        ),
        entry(
            "Gym Class",
            "Physical education and sports activities",
            "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
            30,
            &["john@mergington.edu", "olivia@mergington.edu"],
        ),
        entry(
            "Soccer Team",
            "Join the school soccer team and compete in matches",
            "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
            22,
            &["liam@mergington.edu", "noah@mergington.edu"],
        ),
        entry(
            "Basketball Team",
            "Practice and play basketball with the school team",
            "Wednesdays and Fridays, 3:30 PM - 5:00 PM",
            15,
            &["ava@mergington.edu", "mia@mergington.edu"],
        ),
        entry(
            "Art Club",
            "Explore your creativity through painting and drawing",
            "Thursdays, 3:30 PM - 5:00 PM",
            15,
            &["amelia@mergington.edu", "harper@mergington.edu"],
        ),
        entry(
            "Drama Club",
            "Act, direct, and produce plays and performances",
            "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
            20,
            &["ella@mergington.edu", "scarlett@mergington.edu"],
        ),
        entry(
            "Math Club",
            "Solve challenging problems and participate in math competitions",
            "Tuesdays, 3:30 PM - 4:30 PM",
            10,
            &["james@mergington.edu", "benjamin@mergington.edu"],
        ),
        entry(
            "Debate Team",
            "Develop public speaking and argumentation skills",
            "Fridays, 4:00 PM - 5:30 PM",
            12,
            &["charlotte@mergington.edu", "henry@mergington.edu"],
        ),
    ]
}

fn entry(
    name: &str,
    description: &str,
    schedule: &str,
    max_participants: u32,
    participants: &[&str],
) -> (String, Activity) {
    let activity = Activity::new(description, schedule, max_participants)
        .with_participants(participants.iter().copied());
    (name.to_string(), activity)
}
