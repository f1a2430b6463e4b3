//! Terminal rendering of store snapshots.

use cribinfo_client::compare::{compare_columns, compare_title};
use cribinfo_client::format::{filter_badges, format_price, PriceView};
use cribinfo_client::models::{ChatMessage, ContentType, MessageRole, Property, PropertyRef};

pub fn print_property(index: usize, property: &Property) {
    println!(
        "{}. {} ({})",
        index + 1,
        property.display_title(),
        format_price(property.price_lakhs, PriceView::Card)
    );
    let mut facts = Vec::new();
    if let Some(bhk) = property.bhk {
        facts.push(format!("{bhk} BHK"));
    }
    if let Some(sqft) = property.sqft {
        facts.push(format!("{sqft} sqft"));
    }
    if let Some(baths) = property.bathrooms {
        facts.push(format!("{baths} bath"));
    }
    if !facts.is_empty() {
        println!("   {}", facts.join(", "));
    }
    if let Some(area) = &property.area {
        println!("   Area: {}, {}", area, property.city);
    }
    if let Some((lat, lng)) = property.coordinates() {
        println!("   Map: {lat:.5}, {lng:.5}");
    }
    if !property.amenities.is_empty() {
        let shown: Vec<_> = property.amenities.iter().take(3).cloned().collect();
        println!("   Amenities: {}", shown.join(", "));
    }
    println!("   ID: {}", property.id);
}

pub fn print_results(results: &[PropertyRef]) {
    for (i, property) in results.iter().enumerate() {
        print_property(i, property);
        println!();
    }
}

pub fn print_message(message: &ChatMessage) {
    let who = match message.role {
        MessageRole::User => "you",
        MessageRole::Assistant => "cribinfo",
    };
    let time = message.timestamp.format("%H:%M");
    match message.content_type {
        ContentType::Error => println!("[{time}] {who} ⚠️  {}", message.text),
        _ => println!("[{time}] {who}: {}", message.text),
    }
    if let Some(filters) = &message.filters {
        let badges = filter_badges(filters);
        if !badges.is_empty() {
            println!("   [{}]", badges.join("] ["));
        }
    }
    if let Some(properties) = &message.properties {
        println!();
        print_results(properties);
    }
}

pub fn print_compare(list: &[PropertyRef]) {
    if list.is_empty() {
        println!("Compare list is empty");
        return;
    }
    println!("{}", compare_title(list));
    for column in compare_columns(list) {
        let labels: Vec<_> = column.highlights.iter().map(|h| h.label()).collect();
        println!("- {} ({})", column.header, column.id);
        println!("    BHK: {}", column.bhk);
        println!("    Price: {}", column.price);
        println!("    Size: {}", column.size);
        println!("    Bathrooms: {}", column.bathrooms);
        if !labels.is_empty() {
            println!("    ★ {}", labels.join(", "));
        }
    }
}
