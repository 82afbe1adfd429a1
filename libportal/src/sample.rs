//! Built-in sample data
//!
//! The portal has no backend; every store starts from these fixtures.
//! Each call returns fresh owned values so stores never share state.

use chrono::{NaiveDate, NaiveDateTime};

use crate::types::{
    CalendarEvent, Contact, ContactId, Message, Notification, NotificationKind, Resource,
    ResourceKind, PLACEHOLDER_AVATAR,
};

// Seeded initials pair the honorific with the surname, so they are given
// explicitly rather than derived.
fn contact(id: u64, name: &str, initials: &str, role: &str, last_message: &str, time: &str, unread: bool) -> Contact {
    Contact {
        id: ContactId(id),
        name: name.to_string(),
        role: role.to_string(),
        avatar: PLACEHOLDER_AVATAR.to_string(),
        initials: initials.to_string(),
        last_message: last_message.to_string(),
        time: time.to_string(),
        unread,
    }
}

/// Seeded conversations, most recent first
pub fn contacts() -> Vec<Contact> {
    vec![
        contact(1, "Ms. Johnson", "MJ", "Science Teacher", "About the upcoming science project...", "10:30 AM", true),
        contact(2, "Mr. Smith", "MS", "Math Teacher", "Math homework for next week", "Yesterday", false),
        contact(3, "Mrs. Davis", "MD", "English Teacher", "English literature assignment feedback", "2 days ago", false),
    ]
}

/// Sample thread for the first seeded contact
pub fn thread_for(id: ContactId) -> Vec<Message> {
    if id != ContactId(1) {
        return Vec::new();
    }
    vec![
        Message {
            id: 1,
            sender: "Ms. Johnson".to_string(),
            content: "Hello! I wanted to discuss the upcoming science project with you. Your child has been doing great in class.".to_string(),
            time: "10:30 AM".to_string(),
            is_self: false,
        },
        Message {
            id: 2,
            sender: "You".to_string(),
            content: "Thank you for letting me know. What details should I know about the project?".to_string(),
            time: "10:35 AM".to_string(),
            is_self: true,
        },
        Message {
            id: 3,
            sender: "Ms. Johnson".to_string(),
            content: "The project will be about renewable energy sources. Students will need to create a small model demonstrating one type of renewable energy. Materials can be simple household items.".to_string(),
            time: "10:42 AM".to_string(),
            is_self: false,
        },
    ]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap_or_default()
}

pub fn calendar_events() -> Vec<CalendarEvent> {
    vec![
        CalendarEvent {
            id: 1,
            title: "Parent-Teacher Conference".to_string(),
            date: date(2024, 3, 15),
            time: "3:30 PM - 4:00 PM".to_string(),
            location: "Room 102".to_string(),
            description: "Discuss student progress and upcoming projects".to_string(),
        },
        CalendarEvent {
            id: 2,
            title: "Science Fair".to_string(),
            date: date(2024, 3, 20),
            time: "1:00 PM - 3:00 PM".to_string(),
            location: "School Gymnasium".to_string(),
            description: "Annual science fair with student projects on display".to_string(),
        },
        CalendarEvent {
            id: 3,
            title: "Field Trip - Museum".to_string(),
            date: date(2024, 4, 5),
            time: "9:00 AM - 2:00 PM".to_string(),
            location: "City Museum".to_string(),
            description: "Educational trip to the natural history museum".to_string(),
        },
    ]
}

pub fn notifications() -> Vec<Notification> {
    let n = |id, title: &str, description: &str, kind, date, read| Notification {
        id,
        title: title.to_string(),
        description: description.to_string(),
        kind,
        date,
        read,
    };
    vec![
        n(1, "New message from Ms. Johnson", "About the upcoming science project", NotificationKind::Message, datetime(2024, 3, 10, 10, 30), false),
        n(2, "Grade updated for Science", "Your child's grade has been updated", NotificationKind::Grade, datetime(2024, 3, 9, 15, 45), false),
        n(3, "Parent-Teacher Conference scheduled", "March 15, 2024 at 3:30 PM", NotificationKind::Event, datetime(2024, 3, 8, 13, 15), true),
        n(4, "New resource shared: Math Practice", "Practice worksheets for fractions and decimals", NotificationKind::Resource, datetime(2024, 3, 7, 9, 20), true),
        n(5, "Attendance marked: Absent", "Your child was marked absent on March 3, 2024", NotificationKind::Attendance, datetime(2024, 3, 3, 16, 0), true),
    ]
}

pub fn resources() -> Vec<Resource> {
    let r = |id, title: &str, kind, subject: &str, date, description: &str| Resource {
        id,
        title: title.to_string(),
        kind,
        subject: subject.to_string(),
        grade: "5th Grade".to_string(),
        date,
        description: description.to_string(),
    };
    vec![
        r(1, "Math Practice Worksheets", ResourceKind::Document, "Math", date(2024, 3, 10), "Practice worksheets for fractions and decimals"),
        r(2, "Science Project Guidelines", ResourceKind::Document, "Science", date(2024, 3, 5), "Guidelines for the upcoming renewable energy project"),
        r(3, "Reading List for Summer", ResourceKind::Document, "English", date(2024, 3, 1), "Recommended books for summer reading"),
        r(4, "Introduction to Fractions", ResourceKind::Video, "Math", date(2024, 2, 20), "Video tutorial explaining fractions concepts"),
        r(5, "Solar System Interactive Model", ResourceKind::Interactive, "Science", date(2024, 2, 15), "Interactive model of the solar system"),
    ]
}
