//! Demo content seeding.
//!
//! Populates the site with initial bilingual events, a blog post, and
//! poetry so a fresh install is not empty. Runs only when the events table
//! has no rows.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::models::{Blog, Event, NewBlog, NewEvent, NewPoetry, Poetry};

/// Seed initial content when the store is empty.
pub async fn seed_demo_content(pool: &PgPool) -> Result<()> {
    let existing = Event::list(pool, None).await?;
    if !existing.is_empty() {
        info!("content already present, skipping seed");
        return Ok(());
    }

    info!("seeding demo content");

    for input in demo_events() {
        Event::create(pool, input).await?;
    }
    for input in demo_blogs() {
        Blog::create(pool, input).await?;
    }
    for input in demo_poetry() {
        Poetry::create(pool, input).await?;
    }

    info!("demo content seeded");
    Ok(())
}

fn demo_events() -> Vec<NewEvent> {
    vec![
        NewEvent {
            title: "Kavi Sammelan 2024".to_string(),
            title_hi: Some("कवि सम्मेलन 2024".to_string()),
            description: "Join us for an evening of poetry and literature featuring renowned poets from across India. Experience the beauty of Hindi and Urdu poetry in a cultural celebration.".to_string(),
            description_hi: Some("भारत भर के प्रसिद्ध कवियों को प्रस्तुत करने वाली कविता और साहित्य की एक शाम में हमसे जुड़ें। सांस्कृतिक उत्सव में हिंदी और उर्दू कविता की सुंदरता का अनुभव करें।".to_string()),
            category: "literature".to_string(),
            date: "March 15, 2024".to_string(),
            location: "Mumbai, Maharashtra".to_string(),
            location_hi: Some("मुंबई, महाराष्ट्र".to_string()),
            image_url: None,
            published: Some(true),
            created_by: None,
        },
        NewEvent {
            title: "Education Charity Drive".to_string(),
            title_hi: Some("शिक्षा दान अभियान".to_string()),
            description: "Distributing books and educational materials to rural schools. Help us empower young minds with the gift of knowledge and education.".to_string(),
            description_hi: Some("ग्रामीण स्कूलों में किताबें और शैक्षिक सामग्री वितरित करना। ज्ञान और शिक्षा के उपहार से युवा मन को सशक्त बनाने में हमारी मदद करें।".to_string()),
            category: "education".to_string(),
            date: "March 20, 2024".to_string(),
            location: "Pune, Maharashtra".to_string(),
            location_hi: Some("पुणे, महाराष्ट्र".to_string()),
            image_url: None,
            published: Some(true),
            created_by: None,
        },
        NewEvent {
            title: "Community Reading Session".to_string(),
            title_hi: Some("सामुदायिक पठन सत्र".to_string()),
            description: "Interactive reading and discussion sessions for all age groups. Share stories, discuss literature, and build community connections.".to_string(),
            description_hi: Some("सभी आयु समूहों के लिए इंटरैक्टिव रीडिंग और चर्चा सत्र। कहानियां साझा करें, साहित्य पर चर्चा करें और सामुदायिक संबंध बनाएं।".to_string()),
            category: "culture".to_string(),
            date: "March 25, 2024".to_string(),
            location: "Delhi".to_string(),
            location_hi: Some("दिल्ली".to_string()),
            image_url: None,
            published: Some(true),
            created_by: None,
        },
    ]
}

fn demo_blogs() -> Vec<NewBlog> {
    vec![NewBlog {
        title: "Preserving Regional Languages Through Literature".to_string(),
        title_hi: Some("साहित्य के माध्यम से क्षेत्रीय भाषाओं का संरक्षण".to_string()),
        content: "In an era of globalization, regional languages face the challenge of preservation. Literature serves as a powerful tool to keep these languages alive for future generations. Through poetry, stories, and cultural narratives, we can maintain the rich linguistic diversity of our nation.".to_string(),
        content_hi: Some("वैश्वीकरण के युग में, क्षेत्रीय भाषाओं को संरक्षण की चुनौती का सामना करना पड़ता है। साहित्य भविष्य की पीढ़ियों के लिए इन भाषाओं को जीवित रखने के लिए एक शक्तिशाली उपकरण के रूप में कार्य करता है।".to_string()),
        excerpt: "How literature and education play crucial roles in keeping regional languages alive for future generations.".to_string(),
        excerpt_hi: Some("साहित्य और शिक्षा भविष्य की पीढ़ियों के लिए क्षेत्रीय भाषाओं को जीवित रखने में कैसे महत्वपूर्ण भूमिका निभाते हैं।".to_string()),
        category: "education".to_string(),
        image_url: None,
        author: "Dr. Rajesh Kumar".to_string(),
        published: Some(true),
        created_by: None,
    }]
}

fn demo_poetry() -> Vec<NewPoetry> {
    vec![
        NewPoetry {
            title: "Ek Nayi Subah".to_string(),
            title_hi: Some("एक नई सुबह".to_string()),
            content: "Suraj ki pehli kiran ke saath,\nUmmeedon ka naya savera aata hai,\nAndheron ko pichhe chhodkar,\nUjale ka sansar banata hai.".to_string(),
            content_hi: Some("सूरज की पहली किरण के साथ,\nउम्मीदों का नया सवेरा आता है,\nअंधेरों को पीछे छोड़कर,\nउजाले का संसार बनाता है।".to_string()),
            excerpt: "Suraj ki pehli kiran ke saath, ummeedon ka naya savera aata hai...".to_string(),
            excerpt_hi: Some("सूरज की पहली किरण के साथ, उम्मीदों का नया सवेरा आता है...".to_string()),
            author: "Kavita Sharma".to_string(),
            author_hi: Some("कविता शर्मा".to_string()),
            image_url: None,
            published: Some(true),
            created_by: None,
        },
        NewPoetry {
            title: "Mitti Ki Khushboo".to_string(),
            title_hi: Some("मिट्टी की खुशबू".to_string()),
            content: "Barish ke baad ki mitti,\nYaadein taaza kar jaati hai,\nBachpan ke din yaad aate,\nDil ko sukoon de jaati hai.".to_string(),
            content_hi: Some("बारिश के बाद की मिट्टी,\nयादें ताज़ा कर जाती है,\nबचपन के दिन याद आते,\nदिल को सुकून दे जाती है।".to_string()),
            excerpt: "Barish ke baad ki mitti, yaadein taaza kar jaati hai...".to_string(),
            excerpt_hi: Some("बारिश के बाद की मिट्टी, यादें ताज़ा कर जाती है...".to_string()),
            author: "Amit Verma".to_string(),
            author_hi: Some("अमित वर्मा".to_string()),
            image_url: None,
            published: Some(true),
            created_by: None,
        },
        NewPoetry {
            title: "Sapno Ka Safar".to_string(),
            title_hi: Some("सपनों का सफर".to_string()),
            content: "Raaston mein khoya ek musafir,\nApne sapno ko dhoondta,\nHar mod par naya dariya,\nNayi umang se bharta.".to_string(),
            content_hi: Some("रास्तों में खोया एक मुसाफिर,\nअपने सपनों को ढूंढता,\nहर मोड़ पर नया दरिया,\nनई उमंग से भरता।".to_string()),
            excerpt: "Raaston mein khoya ek musafir, apne sapno ko dhoondta...".to_string(),
            excerpt_hi: Some("रास्तों में खोया एक मुसाफिर, अपने सपनों को ढूंढता...".to_string()),
            author: "Priya Singh".to_string(),
            author_hi: Some("प्रिया सिंह".to_string()),
            image_url: None,
            published: Some(true),
            created_by: None,
        },
    ]
}
