// Seed data shared by the integration tests
use member_api::models::join::{Biodata, Intro, JoinData, Location};
use member_api::models::photo_verification::{ImageCheck, PhotoVerification};
use member_api::models::user::{Availability, Contact, Profile, Roles};
use member_api::services::store::Store;

pub fn member_profile(username: &str) -> Profile {
    Profile {
        username: username.to_string(),
        first_name: Some("Ankush".to_string()),
        last_name: Some("Dharkar".to_string()),
        yoe: Some(0),
        company: Some("Deloitte".to_string()),
        designation: Some("Frontend Developer".to_string()),
        img: Some("./img.png".to_string()),
        github_id: Some(username.to_string()),
        github_display_name: Some("Ankush Dharkar".to_string()),
        linkedin_id: Some("ankushdharkar".to_string()),
        twitter_id: Some("ankushdharkar".to_string()),
        discord_id: Some("12345".to_string()),
        is_member: true,
        status: Some(Availability::Active),
        roles: Roles {
            member: true,
            ..Roles::default()
        },
        ..Profile::default()
    }
}

pub fn contact() -> Contact {
    Contact {
        email: Some("abc@gmail.com".to_string()),
        phone: Some("1234567890".to_string()),
    }
}

pub async fn add_member(store: &Store, username: &str) -> String {
    store
        .add_or_update_user(member_profile(username), contact())
        .await
}

pub async fn add_super_user(store: &Store) -> String {
    let mut profile = member_profile("ankur");
    profile.discord_id = Some("99999".to_string());
    profile.roles.super_user = true;
    store.add_or_update_user(profile, contact()).await
}

pub async fn add_archived(store: &Store, username: &str) -> String {
    let mut profile = member_profile(username);
    profile.roles.archived = true;
    store.add_or_update_user(profile, contact()).await
}

pub fn photo_verification(user_id: &str) -> PhotoVerification {
    PhotoVerification {
        user_id: user_id.to_string(),
        discord_id: Some("12345".to_string()),
        profile: ImageCheck {
            url: Some("https://res.cloudinary.com/profile.png".to_string()),
            approved: false,
        },
        discord: ImageCheck {
            url: Some("https://cdn.discordapp.com/avatars/12345/abc.png".to_string()),
            approved: false,
        },
    }
}

pub fn long_text() -> String {
    "I like building things on the web and learning from people who do the same. ".repeat(3)
}

/// A complete, valid join body.
pub fn join_body() -> serde_json::Value {
    serde_json::json!({
        "firstName": "Ankush",
        "lastName": "Dharkar",
        "city": "Kolhapur",
        "state": "Maharashtra",
        "country": "India",
        "foundFrom": "twitter",
        "introduction": long_text(),
        "skills": "React, Rust",
        "college": "Shivaji University",
        "forFun": long_text(),
        "funFact": long_text(),
        "whyRds": long_text(),
        "flowState": "coding at night",
        "numberOfHours": 10
    })
}

pub fn join_data(user_id: &str) -> JoinData {
    JoinData {
        user_id: user_id.to_string(),
        biodata: Biodata {
            first_name: "Ankush".to_string(),
            last_name: "Dharkar".to_string(),
        },
        location: Location {
            city: "Kolhapur".to_string(),
            state: "Maharashtra".to_string(),
            country: "India".to_string(),
        },
        found_from: "twitter".to_string(),
        intro: Intro {
            introduction: long_text(),
            skills: "React".to_string(),
            college: "Shivaji University".to_string(),
            for_fun: long_text(),
            fun_fact: long_text(),
            why_rds: long_text(),
            flow_state: None,
            number_of_hours: 5,
        },
        timestamp: chrono::Utc::now(),
    }
}
