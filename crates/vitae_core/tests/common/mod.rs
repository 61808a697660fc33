#![allow(dead_code)]

use chrono::NaiveDate;
use serde_json::{json, Value};
use vitae_core::{Document, Session, SessionConfig};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("fixed today should be valid")
}

pub fn sample_value() -> Value {
    json!({
        "name": "Ada Example",
        "label": "Systems Engineer",
        "location": "Lisbon, PT",
        "email": "ada@example.com",
        "website": "https://ada.example.com",
        "social_networks": [
            {"network": "GitHub", "username": "ada", "url": "https://github.com/ada"}
        ],
        "pronouns": "she/her",
        "sections": {
            "intro": ["I build **reliable** tools. See [my blog](https://ada.example.com/blog)."],
            "skills": [
                {"label": "Languages", "details": "Rust, Python, SQL"},
                {"label": "Tooling", "details": "Cargo, Git"}
            ],
            "experience": [
                {
                    "company": "Now Corp",
                    "position": "Staff Engineer",
                    "location": "Remote",
                    "start_date": "2023-01",
                    "highlights": ["Ported the ingest pipeline from Python to Rust"],
                    "team_size": 6
                },
                {
                    "company": "Then Inc",
                    "position": "Engineer",
                    "start_date": "Jun 2018",
                    "end_date": "2022-11",
                    "show": false
                }
            ],
            "education": [
                {
                    "institution": "Tech University",
                    "area": "Computer Science",
                    "degree": "BSc",
                    "start_date": "2014",
                    "end_date": "2018",
                    "gpa": "3.9"
                }
            ],
            "projects": [
                {"name": "vitae", "date": "2024-02", "summary": "Resume toolkit"}
            ],
            "publications": [
                {
                    "title": "Fast Parsing",
                    "authors": ["Ada Example", "B. Other"],
                    "date": "2021-09",
                    "journal": "J. Parsing",
                    "doi": "10.1000/xyz"
                }
            ],
            "Open Source": [
                {"name": "serde patch", "summary": "Fixed a flatten bug"}
            ],
            "Awards": []
        }
    })
}

pub fn sample_document() -> Document {
    serde_json::from_value(sample_value()).expect("sample document should decode")
}

pub fn fixed_config() -> SessionConfig {
    SessionConfig {
        today: Some(today()),
        ..SessionConfig::default()
    }
}

pub fn sample_session() -> Session {
    Session::new(sample_document(), fixed_config())
}

pub fn document_with(sections: Value) -> Document {
    serde_json::from_value(json!({"name": "Ada Example", "sections": sections}))
        .expect("document should decode")
}
