//! Listing titles and marketplace-specific descriptions.
//!
//! Every description is built from the same item fields. Each platform gets
//! the tone its buyers expect: hashtags on Poshmark, short and casual on Depop,
//! HTML on eBay, concise on Mercari and Chinese on Xiaohongshu.

use crate::domain::inventory::Item;
use crate::domain::market::Condition;
use crate::domain::pricing::Platform;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDescriptions {
    pub title: String,
    /// Plain-text description for any other marketplace
    pub generic: String,
    pub poshmark: String,
    pub depop: String,
    /// HTML fragment
    pub ebay: String,
    pub mercari: String,
    pub xiaohongshu: String,
}

impl ListingDescriptions {
    pub fn for_item(item: &Item) -> Self {
        let fields = Fields::from_item(item);
        let title = listing_title(item);

        Self {
            generic: generic(&fields, &title),
            poshmark: poshmark(&fields, &title),
            depop: depop(&fields, &title),
            ebay: ebay(&fields, &title),
            mercari: mercari(&fields, &title),
            xiaohongshu: xiaohongshu(&fields, &title),
            title,
        }
    }

    pub fn for_platform(&self, platform: Platform) -> &str {
        match platform {
            Platform::Poshmark => &self.poshmark,
            Platform::Depop => &self.depop,
            Platform::Mercari => &self.mercari,
            Platform::Ebay => &self.ebay,
            Platform::Xiaohongshu => &self.xiaohongshu,
        }
    }
}

/// Brand, name and size. The brand is left out when the name already
/// mentions it.
pub fn listing_title(item: &Item) -> String {
    let name = item.name.trim();
    let brand = item.brand.trim();
    let size = item.size.trim();

    let mut parts = Vec::with_capacity(3);
    if !brand.is_empty() && !name.to_lowercase().contains(&brand.to_lowercase()) {
        parts.push(brand.to_string());
    }
    parts.push(name.to_string());
    if !size.is_empty() {
        parts.push(format!("Size {}", size));
    }
    parts.join(" ")
}

/// Trimmed item fields, shared by every platform template
struct Fields<'a> {
    brand: &'a str,
    category: &'a str,
    color: &'a str,
    size: &'a str,
    measurements: &'a str,
    notes: &'a str,
    condition: Condition,
}

impl<'a> Fields<'a> {
    fn from_item(item: &'a Item) -> Self {
        Self {
            brand: item.brand.trim(),
            category: item.category.trim(),
            color: item.color.trim(),
            size: item.size.trim(),
            measurements: item.measurements.trim(),
            notes: item.notes.trim(),
            condition: item.condition,
        }
    }

    fn emoji(&self) -> &'static str {
        match self.category.to_lowercase().as_str() {
            "tops" => "👕",
            "bottoms" => "👖",
            "dresses" => "👗",
            "outerwear" => "🧥",
            "shoes" => "👟",
            "bags" => "👜",
            "accessories" => "💍",
            _ => "✨",
        }
    }

    fn condition_text(&self) -> &'static str {
        match self.condition {
            Condition::New => "Brand new with tags, never worn!",
            Condition::Excellent => "Like new condition, minimal to no signs of wear.",
            Condition::Good => "Gently used, in great condition with light wear.",
            Condition::Fair => {
                "Pre-loved with visible signs of wear. Please see photos for details."
            }
        }
    }
}

fn generic(fields: &Fields, title: &str) -> String {
    let mut out = format!("{} {}\n\n", fields.emoji(), title);
    for (label, value) in [
        ("Brand", fields.brand),
        ("Color", fields.color),
        ("Size", fields.size),
        ("Measurements", fields.measurements),
    ] {
        if !value.is_empty() {
            let _ = writeln!(out, "{}: {}", label, value);
        }
    }
    let _ = writeln!(out, "\nCondition: {}", fields.condition_text());
    if !fields.notes.is_empty() {
        let _ = writeln!(out, "\n{}", fields.notes);
    }
    out
}

fn poshmark(fields: &Fields, title: &str) -> String {
    let mut out = generic(fields, title);
    out.push_str("\n💕 Bundle to save on shipping!\n");
    out.push_str("📦 Ships within 1-2 business days\n");
    out.push_str("❓ Questions? Just ask!\n\n#");
    if !fields.brand.is_empty() {
        out.push_str(&fields.brand.to_lowercase().replace(' ', ""));
        out.push(' ');
    }
    if !fields.category.is_empty() {
        out.push_str(fields.category);
        out.push(' ');
    }
    out.push_str("resale thrift secondhand");
    out
}

fn depop(fields: &Fields, title: &str) -> String {
    let mut out = format!("{} {}\n\n{}\n", fields.emoji(), title, fields.condition_text());
    if !fields.measurements.is_empty() {
        let _ = writeln!(out, "📏 {}", fields.measurements);
    }
    out.push_str("\n✨ dm me with any questions!");
    out
}

fn ebay(fields: &Fields, title: &str) -> String {
    let brand = if fields.brand.is_empty() {
        "Unbranded"
    } else {
        fields.brand
    };

    let mut out = String::new();
    let _ = writeln!(out, "<h2>{}</h2>", escape_html(title));
    let _ = writeln!(out, "<p><strong>Brand:</strong> {}</p>", escape_html(brand));
    let _ = writeln!(
        out,
        "<p><strong>Condition:</strong> {}</p>",
        fields.condition_text()
    );
    for (label, value) in [
        ("Color", fields.color),
        ("Size", fields.size),
        ("Measurements", fields.measurements),
    ] {
        if !value.is_empty() {
            let _ = writeln!(out, "<p><strong>{}:</strong> {}</p>", label, escape_html(value));
        }
    }
    if !fields.notes.is_empty() {
        let _ = writeln!(out, "<p>{}</p>", escape_html(fields.notes));
    }
    out.push_str(
        "\n<p>Please review all photos carefully. Feel free to message with any questions!</p>\n",
    );
    out.push_str("<p>Ships within 1-2 business days with tracking.</p>");
    out
}

fn mercari(fields: &Fields, title: &str) -> String {
    let mut out = format!("{}\n\n{}\n", title, fields.condition_text());
    if !fields.size.is_empty() {
        let _ = writeln!(out, "Size: {}", fields.size);
    }
    if !fields.measurements.is_empty() {
        let _ = writeln!(out, "Measurements: {}", fields.measurements);
    }
    out.push_str("\nMessage me with any questions! Ships fast 📦");
    out
}

fn xiaohongshu(fields: &Fields, title: &str) -> String {
    let brand = if fields.brand.is_empty() {
        "无品牌"
    } else {
        fields.brand
    };
    let condition = match fields.condition {
        Condition::New => "全新带标签",
        Condition::Excellent => "九成新",
        Condition::Good => "八成新",
        Condition::Fair => "有使用痕迹",
    };

    let mut out = format!("✨ {}\n\n品牌: {}\n状态: {}\n", title, brand, condition);
    if !fields.size.is_empty() {
        let _ = writeln!(out, "尺码: {}", fields.size);
    }
    if !fields.color.is_empty() {
        let _ = writeln!(out, "颜色: {}", fields.color);
    }
    out.push_str("\n🏷️ 闲置转让 价格可小刀\n💬 有问题可以私信~");
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn boots() -> Item {
        let mut item = Item::new("Platform Heel Boots", dec!(85), Some(dec!(30))).unwrap();
        item.brand = "Dr. Martens".to_string();
        item.category = "shoes".to_string();
        item.condition = Condition::Good;
        item.color = "Black".to_string();
        item.size = "US 8".to_string();
        item.measurements = "Heel height: 3 inches".to_string();
        item.notes = "Super comfortable chunky platform. Perfect for fall!".to_string();
        item
    }

    #[test]
    fn test_title_prefixes_brand_and_appends_size() {
        assert_eq!(listing_title(&boots()), "Dr. Martens Platform Heel Boots Size US 8");
    }

    #[test]
    fn test_title_skips_brand_already_in_name() {
        let mut item = boots();
        item.name = "dr. martens jadon boots".to_string();
        item.size.clear();
        assert_eq!(listing_title(&item), "dr. martens jadon boots");
    }

    #[test]
    fn test_generic_description_lists_details() {
        let text = ListingDescriptions::for_item(&boots()).generic;
        assert!(text.starts_with("👟 Dr. Martens Platform Heel Boots Size US 8\n\n"));
        assert!(text.contains("Brand: Dr. Martens\nColor: Black\nSize: US 8\n"));
        assert!(text.contains("Measurements: Heel height: 3 inches\n"));
        assert!(text.contains("\nCondition: Gently used, in great condition with light wear.\n"));
        assert!(text.ends_with("\nSuper comfortable chunky platform. Perfect for fall!\n"));
    }

    #[test]
    fn test_poshmark_hashtags() {
        let text = ListingDescriptions::for_item(&boots()).poshmark;
        assert!(text.contains("💕 Bundle to save on shipping!"));
        assert!(text.ends_with("#dr.martens shoes resale thrift secondhand"));
    }

    #[test]
    fn test_depop_is_short() {
        let text = ListingDescriptions::for_item(&boots()).depop;
        assert_eq!(
            text,
            "👟 Dr. Martens Platform Heel Boots Size US 8\n\n\
             Gently used, in great condition with light wear.\n\
             📏 Heel height: 3 inches\n\n\
             ✨ dm me with any questions!"
        );
    }

    #[test]
    fn test_ebay_html_defaults_and_escaping() {
        let mut item = Item::new("Tote <large>", dec!(40), None).unwrap();
        item.notes = "Fits A4 & laptops".to_string();
        let text = ListingDescriptions::for_item(&item).ebay;

        assert!(text.starts_with("<h2>Tote &lt;large&gt;</h2>\n"));
        assert!(text.contains("<p><strong>Brand:</strong> Unbranded</p>"));
        assert!(text.contains("<p>Fits A4 &amp; laptops</p>"));
        assert!(!text.contains("<strong>Color:</strong>"));
        assert!(text.ends_with("<p>Ships within 1-2 business days with tracking.</p>"));
    }

    #[test]
    fn test_mercari_and_xiaohongshu() {
        let descriptions = ListingDescriptions::for_item(&boots());
        assert!(descriptions.mercari.contains("Size: US 8\nMeasurements: Heel height: 3 inches\n"));
        assert!(descriptions.mercari.ends_with("Ships fast 📦"));

        assert!(descriptions.xiaohongshu.contains("品牌: Dr. Martens\n状态: 八成新\n"));
        assert!(descriptions.xiaohongshu.contains("尺码: US 8\n颜色: Black\n"));
    }

    #[test]
    fn test_unknown_category_uses_sparkles() {
        let mut item = boots();
        item.category = "Vintage".to_string();
        assert!(ListingDescriptions::for_item(&item).generic.starts_with("✨ "));
    }

    #[test]
    fn test_for_platform_selects_matching_text() {
        let descriptions = ListingDescriptions::for_item(&boots());
        assert_eq!(descriptions.for_platform(Platform::Ebay), descriptions.ebay);
        assert_eq!(descriptions.for_platform(Platform::Depop), descriptions.depop);
    }
}
