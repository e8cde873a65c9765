//! Integration tests for the wardrobe pages.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (`glamdiva-cli migrate`)
//! - The web server running (`cargo run -p glamdiva-web`)

use glamdiva_integration_tests::{location, signed_in_client, url};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};

/// A tiny but valid 1x1 PNG.
const PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0xF8, 0xCF, 0xC0, 0xF0,
    0x1F, 0x00, 0x05, 0x00, 0x01, 0xFF, 0x89, 0x99, 0x3D, 0x1D, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45,
    0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

fn item_form(name: &str, category: &str, color: &str, notes: &str) -> Form {
    Form::new()
        .text("name", name.to_owned())
        .text("category", category.to_owned())
        .text("color", color.to_owned())
        .text("notes", notes.to_owned())
}

async fn add(client: &Client, form: Form) -> String {
    let resp = client
        .post(url("/wardrobe"))
        .multipart(form)
        .send()
        .await
        .expect("add item");
    location(&resp)
}

async fn wardrobe_page(client: &Client, query: &str) -> String {
    let resp = client
        .get(url(&format!("/wardrobe{query}")))
        .send()
        .await
        .expect("wardrobe");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.text().await.expect("body")
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_add_list_filter_and_delete() {
    let (client, _email) = signed_in_client("Hana").await;

    assert_eq!(
        add(&client, item_form("Linen Shirt", "Top", "White", "summer office")).await,
        "/wardrobe?success=item_added"
    );
    assert_eq!(
        add(&client, item_form("Wide Jeans", "Bottom", "Indigo", "")).await,
        "/wardrobe?success=item_added"
    );

    let all = wardrobe_page(&client, "").await;
    assert!(all.contains("Linen Shirt") && all.contains("Wide Jeans"));
    // Newest first by default
    assert!(all.find("Wide Jeans") < all.find("Linen Shirt"));

    let by_name = wardrobe_page(&client, "?sort=name").await;
    assert!(by_name.find("Linen Shirt") < by_name.find("Wide Jeans"));

    let tops = wardrobe_page(&client, "?category=Top").await;
    assert!(tops.contains("Linen Shirt") && !tops.contains("Wide Jeans"));

    let searched = wardrobe_page(&client, "?q=OFFICE").await;
    assert!(searched.contains("Linen Shirt") && !searched.contains("Wide Jeans"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_add_validation() {
    let (client, _email) = signed_in_client("Ines").await;

    assert_eq!(
        add(&client, item_form("", "Top", "", "")).await,
        "/wardrobe?error=item_required"
    );

    let bad_photo = item_form("Scarf", "Accessory", "Red", "").part(
        "image",
        Part::bytes(b"MZ".to_vec()).file_name("scarf.exe"),
    );
    assert_eq!(add(&client, bad_photo).await, "/wardrobe?error=unsupported_image");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_photo_is_stored_and_served() {
    let (client, _email) = signed_in_client("Jo").await;

    let form = item_form("Silk Scarf", "Accessory", "Emerald", "").part(
        "image",
        Part::bytes(PIXEL_PNG.to_vec())
            .file_name("My Scarf.PNG")
            .mime_str("image/png")
            .expect("mime"),
    );
    assert_eq!(add(&client, form).await, "/wardrobe?success=item_added");

    let page = wardrobe_page(&client, "").await;
    let start = page.find("src=\"/uploads/").expect("photo in page") + "src=\"".len();
    let end = start + page[start..].find('"').expect("closing quote");
    let src = &page[start..end];
    assert!(src.contains("_My_Scarf_") && src.ends_with(".png"), "{src}");

    let resp = client.get(url(src)).send().await.expect("photo");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.bytes().await.expect("bytes").as_ref(), PIXEL_PNG);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_cannot_delete_someone_elses_item() {
    let (owner, _email) = signed_in_client("Kai").await;
    let (intruder, _email) = signed_in_client("Lou").await;

    assert_eq!(
        add(&owner, item_form("Trench Coat", "Outerwear", "Camel", "")).await,
        "/wardrobe?success=item_added"
    );

    let page = wardrobe_page(&owner, "").await;
    let start = page.find("/wardrobe/delete/").expect("delete form");
    let action: String = page[start..]
        .chars()
        .take_while(|c| *c != '"')
        .collect();

    let resp = intruder.post(url(&action)).send().await.expect("delete");
    assert_eq!(location(&resp), "/wardrobe?error=item_not_found");
    assert!(wardrobe_page(&owner, "").await.contains("Trench Coat"));

    let resp = owner.post(url(&action)).send().await.expect("delete");
    assert_eq!(location(&resp), "/wardrobe?success=item_deleted");
    assert!(!wardrobe_page(&owner, "").await.contains("Trench Coat"));
}
