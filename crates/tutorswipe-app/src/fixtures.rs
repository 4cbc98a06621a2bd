//! Seed data for the demo and tests.

use crate::model::{Chat, ChatId, Tutor, TutorId};
use crate::services::{Offering, Package};

fn tutor(id: u32, name: &str, bio: &str, rating: f32, photo: &str, video: &str) -> Tutor {
    Tutor {
        id: TutorId(id),
        name: name.to_string(),
        bio: bio.to_string(),
        rating,
        photo_url: format!("https://images.unsplash.com/{photo}"),
        video_url: Some(format!(
            "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/{video}"
        )),
    }
}

pub fn sample_tutors() -> Vec<Tutor> {
    vec![
        tutor(
            1,
            "Sarah Chen",
            "Mathematics tutor with 5+ years experience. Specializing in calculus and algebra.",
            4.8,
            "photo-1494790108755-2616b9d5f296",
            "BigBuckBunny.mp4",
        ),
        tutor(
            2,
            "Michael Rodriguez",
            "Physics and Chemistry expert. Making complex concepts simple and fun.",
            4.9,
            "photo-1507003211169-0a1dd7228f2d",
            "ElephantsDream.mp4",
        ),
        tutor(
            3,
            "Emma Wilson",
            "English Literature and Creative Writing mentor.",
            4.7,
            "photo-1438761681033-6461ffad8d80",
            "ForBiggerBlazes.mp4",
        ),
        tutor(
            4,
            "David Kim",
            "Computer Science and Programming instructor. Algorithms and data structures.",
            4.6,
            "photo-1472099645785-5658abf4ff4e",
            "ForBiggerEscapes.mp4",
        ),
        tutor(
            5,
            "Lisa Thompson",
            "History and Social Studies teacher. Bringing the past to life.",
            4.8,
            "photo-1489424731084-a5d8b219a5bb",
            "ForBiggerFun.mp4",
        ),
    ]
}

fn chat(id: u32, name: &str, last_message: &str, unread: bool, muted: bool) -> Chat {
    Chat {
        id: ChatId(id),
        name: name.to_string(),
        last_message: last_message.to_string(),
        unread,
        muted,
    }
}

pub fn sample_chats() -> Vec<Chat> {
    vec![
        chat(1, "Sarah Johnson", "See you at 5pm!", true, false),
        chat(2, "Michael Chen", "Let me know if you need help.", false, false),
        chat(3, "Emma Wilson", "Thanks for your help!", true, true),
        chat(4, "James Brown", "Can we reschedule our meeting?", false, false),
    ]
}

pub fn premium_offering() -> Offering {
    let package = |identifier: &str, title: &str, price: &str| Package {
        identifier: identifier.to_string(),
        title: title.to_string(),
        price: price.to_string(),
    };
    Offering {
        identifier: "default".to_string(),
        packages: vec![
            package("$rc_monthly", "Premium Monthly", "$9.99"),
            package("$rc_annual", "Premium Annual", "$79.99"),
        ],
    }
}
