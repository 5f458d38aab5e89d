mod common;

use std::time::Duration;

use axum::http::StatusCode;
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use agri_supply::{
    db::{
        dao::{DaoContext, NewProduce},
        entities::farmer,
    },
    services::farmer_service::PRODUCE_PAGE_SIZE,
};

use common::{Browser, PASSWORD, body_text, location, produce_count, user_id};

async fn signed_in_farmer(email: &str) -> Browser {
    let mut browser = Browser::new().await;
    browser.register("Kiran", email, "Farmer").await;
    let login = browser.login(email, PASSWORD).await;
    assert_eq!(location(&login), "/farmer/dashboard");
    browser
}

fn harvest<'a>(crop: &'a str, quantity: &'a str, date: &'a str) -> [(&'static str, &'a str); 4] {
    [
        ("crop_name", crop),
        ("quantity", quantity),
        ("quality", "Grade A"),
        ("harvest_date", date),
    ]
}

#[tokio::test]
async fn farmer_records_and_lists_produce() {
    let mut browser = signed_in_farmer("kiran@example.com").await;

    let form = browser.get("/farmer/add-produce").await;
    assert_eq!(form.status(), StatusCode::OK);

    let saved = browser
        .post_form("/farmer/add-produce", &harvest("Basmati rice", "250.5", "2026-09-30"))
        .await;
    assert_eq!(location(&saved), "/farmer/view-produce");
    let listing = browser.follow(saved).await;
    assert!(listing.contains("Produce added successfully"));
    assert!(listing.contains("Basmati rice"));
    assert!(listing.contains("250.5"));
    assert!(listing.contains("2026-09-30"));

    let dashboard = browser.get("/farmer/dashboard").await;
    assert_eq!(dashboard.status(), StatusCode::OK);
    assert_eq!(produce_count(&browser.state).await, 1);
}

#[tokio::test]
async fn invalid_produce_goes_back_to_the_form() {
    let mut browser = signed_in_farmer("lata@example.com").await;

    let response = browser
        .post_form("/farmer/add-produce", &harvest("Maize", "plenty", "2026-09-30"))
        .await;
    assert_eq!(location(&response), "/farmer/add-produce");
    let page = browser.follow(response).await;
    assert!(page.contains("Quantity must be a positive number"));

    let response = browser
        .post_form("/farmer/add-produce", &harvest("Maize", "10", "30/09/2026"))
        .await;
    let page = browser.follow(response).await;
    assert!(page.contains("Harvest date must be a valid date"));

    assert_eq!(produce_count(&browser.state).await, 0);
}

#[tokio::test]
async fn produce_without_a_farmer_profile_is_rejected() {
    let mut browser = signed_in_farmer("mohan@example.com").await;
    let mohan = user_id(&browser.state, "mohan@example.com").await;
    farmer::Entity::delete_many()
        .filter(farmer::Column::UserId.eq(mohan))
        .exec(&browser.state.db)
        .await
        .unwrap();

    let response = browser
        .post_form("/farmer/add-produce", &harvest("Sorghum", "40", "2026-08-01"))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/farmer/dashboard");
    let page = browser.follow(response).await;
    assert!(page.contains("Farmer profile not found"));

    assert_eq!(produce_count(&browser.state).await, 0);
}

#[tokio::test]
async fn produce_pages_are_farmer_only() {
    let mut browser = Browser::new().await;
    browser
        .register("Nila", "nila@example.com", "Logistics Operator")
        .await;
    browser.login("nila@example.com", PASSWORD).await;

    for path in ["/farmer/add-produce", "/farmer/view-produce"] {
        let response = browser.get(path).await;
        assert_eq!(location(&response), "/login", "{path}");
    }

    let response = browser
        .post_form("/farmer/add-produce", &harvest("Cotton", "5", "2026-07-15"))
        .await;
    assert_eq!(location(&response), "/login");
    assert_eq!(produce_count(&browser.state).await, 0);
}

#[tokio::test]
async fn newest_produce_is_listed_first() {
    let mut browser = signed_in_farmer("omana@example.com").await;

    for crop in ["Ragi", "Turmeric", "Black pepper"] {
        let saved = browser
            .post_form("/farmer/add-produce", &harvest(crop, "12", "2026-10-01"))
            .await;
        assert_eq!(location(&saved), "/farmer/view-produce");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let listing = body_text(browser.get("/farmer/view-produce").await).await;
    let position = |crop: &str| {
        listing
            .find(crop)
            .unwrap_or_else(|| panic!("{crop} missing from listing"))
    };
    assert!(position("Black pepper") < position("Turmeric"));
    assert!(position("Turmeric") < position("Ragi"));
}

#[tokio::test]
async fn long_produce_history_is_paged_through_every_row() {
    const TOTAL: usize = 105;

    let mut browser = signed_in_farmer("prakash@example.com").await;
    let prakash = user_id(&browser.state, "prakash@example.com").await;
    let farmer_id = farmer::Entity::find()
        .filter(farmer::Column::UserId.eq(prakash))
        .one(&browser.state.db)
        .await
        .unwrap()
        .expect("registration creates the profile")
        .id;
    let produce = DaoContext::new(&browser.state.db).produce();
    for lot in 0..TOTAL {
        produce
            .create_produce(
                &farmer_id,
                NewProduce {
                    crop_name: format!("Lot {lot:03}"),
                    quantity: 10.0,
                    quality: "Grade A".to_string(),
                    harvest_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                },
            )
            .await
            .unwrap();
    }
    assert_eq!(produce_count(&browser.state).await, TOTAL as u64);

    let mut seen = Vec::new();
    let mut page_no = 1;
    loop {
        let response = browser
            .get(&format!("/farmer/view-produce?page={page_no}"))
            .await;
        assert_eq!(response.status(), StatusCode::OK, "page {page_no}");
        let body = body_text(response).await;
        let on_page: Vec<usize> = (0..TOTAL)
            .filter(|lot| body.contains(&format!("Lot {lot:03}")))
            .collect();
        assert!(on_page.len() <= PRODUCE_PAGE_SIZE as usize);
        seen.extend(on_page);

        assert_eq!(body.contains("rel=\"prev\""), page_no > 1, "page {page_no}");
        let next = format!("/farmer/view-produce?page={}", page_no + 1);
        if !body.contains(&next) {
            break;
        }
        page_no += 1;
    }

    let expected_pages = TOTAL.div_ceil(PRODUCE_PAGE_SIZE as usize);
    assert_eq!(page_no, expected_pages);
    seen.sort_unstable();
    assert_eq!(seen, (0..TOTAL).collect::<Vec<_>>());
}

#[tokio::test]
async fn page_zero_is_rejected_with_a_flash() {
    let mut browser = signed_in_farmer("rukmini@example.com").await;

    let response = browser.get("/farmer/view-produce?page=0").await;
    assert_eq!(location(&response), "/farmer/dashboard");
}
