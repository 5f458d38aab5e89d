mod common;

use axum::http::{StatusCode, header};

use agri_supply::{
    auth::{Role, password::hash_password},
    db::dao::{DaoContext, NewUser},
};

use common::{Browser, PASSWORD, body_text, location, profile_count, user_count, user_id};

#[tokio::test]
async fn duplicate_email_is_rejected_without_a_second_row() {
    let mut browser = Browser::new().await;

    let first = browser
        .register("Asha", "asha@example.com", "Retailer")
        .await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&first), "/login");

    let second = browser
        .register("Asha Again", "ASHA@example.com", "Farmer")
        .await;
    assert_eq!(location(&second), "/register");
    let page = browser.follow(second).await;
    assert!(page.contains("Email already registered"));

    assert_eq!(user_count(&browser.state).await, 1);
}

#[tokio::test]
async fn short_password_is_rejected_before_any_write() {
    let mut browser = Browser::new().await;

    let response = browser
        .post_form(
            "/register",
            &[
                ("name", "Bala"),
                ("email", "bala@example.com"),
                ("password", "12345"),
                ("role", "Farmer"),
            ],
        )
        .await;
    assert_eq!(location(&response), "/register");
    let page = browser.follow(response).await;
    assert!(page.contains("Password must be at least 6 characters"));

    assert_eq!(user_count(&browser.state).await, 0);
}

#[tokio::test]
async fn missing_fields_are_reported() {
    let mut browser = Browser::new().await;

    let response = browser
        .post_form("/register", &[("name", "Chitra"), ("email", "c@example.com")])
        .await;
    let page = browser.follow(response).await;
    assert!(page.contains("All fields are required"));
    assert_eq!(user_count(&browser.state).await, 0);
}

#[tokio::test]
async fn login_lands_on_the_dashboard_of_the_stored_role() {
    let mut browser = Browser::new().await;

    for (index, role) in Role::ALL.iter().enumerate() {
        let email = format!("user{index}@example.com");
        let registered = browser
            .register("Devi", &email, role.display_name())
            .await;
        assert_eq!(location(&registered), "/login", "{role}");

        let mut visitor = browser.fresh_visitor();
        let login = visitor.login(&email, PASSWORD).await;
        assert_eq!(login.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&login), role.dashboard_path());

        let dashboard = visitor.get(role.dashboard_path()).await;
        assert_eq!(dashboard.status(), StatusCode::OK);
        assert!(body_text(dashboard).await.contains("Welcome, Devi"));
    }
}

#[tokio::test]
async fn role_slugs_and_display_names_are_both_accepted() {
    let mut browser = Browser::new().await;
    browser
        .register("Esha", "esha@example.com", "logistics_operator")
        .await;

    let login = browser.login("esha@example.com", PASSWORD).await;
    assert_eq!(location(&login), "/logistics/dashboard");
}

#[tokio::test]
async fn bad_credentials_do_not_reveal_whether_the_email_exists() {
    let mut browser = Browser::new().await;
    browser
        .register("Farah", "farah@example.com", "Retailer")
        .await;

    let mut stranger = browser.fresh_visitor();
    let unknown = stranger.login("nobody@example.com", PASSWORD).await;
    let unknown_location = location(&unknown).to_string();
    let unknown_page = stranger.follow(unknown).await;

    let mut guesser = browser.fresh_visitor();
    let wrong = guesser.login("farah@example.com", "not-my-password").await;
    let wrong_location = location(&wrong).to_string();
    let wrong_page = guesser.follow(wrong).await;

    assert_eq!(unknown_location, "/login");
    assert_eq!(unknown_location, wrong_location);
    assert!(unknown_page.contains("Invalid email or password"));
    assert_eq!(unknown_page, wrong_page);
    assert!(!guesser.has_session());
}

#[tokio::test]
async fn farmer_has_exactly_one_profile_after_first_login() {
    let mut browser = Browser::new().await;
    browser
        .register("Gopal", "gopal@example.com", "Farmer")
        .await;
    let gopal = user_id(&browser.state, "gopal@example.com").await;
    assert_eq!(profile_count(&browser.state, gopal).await, 1);

    let login = browser.login("gopal@example.com", PASSWORD).await;
    assert_eq!(location(&login), "/farmer/dashboard");
    assert_eq!(profile_count(&browser.state, gopal).await, 1);
}

#[tokio::test]
async fn login_creates_a_missing_farmer_profile_once() {
    let browser = Browser::new().await;
    let legacy = DaoContext::new(&browser.state.db)
        .user()
        .create_user(NewUser {
            name: "Hari".to_string(),
            email: "hari@example.com".to_string(),
            password_hash: hash_password(PASSWORD).unwrap(),
            role: Role::Farmer,
        })
        .await
        .unwrap();
    assert_eq!(profile_count(&browser.state, legacy.id).await, 0);

    for _ in 0..2 {
        let mut visitor = browser.fresh_visitor();
        let login = visitor.login("hari@example.com", PASSWORD).await;
        assert_eq!(location(&login), "/farmer/dashboard");
    }
    assert_eq!(profile_count(&browser.state, legacy.id).await, 1);
}

#[tokio::test]
async fn dashboards_reject_other_roles() {
    let mut browser = Browser::new().await;
    browser
        .register("Indu", "indu@example.com", "Retailer")
        .await;
    browser.login("indu@example.com", PASSWORD).await;

    let response = browser.get("/farmer/dashboard").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let page = browser.follow(response).await;
    assert!(page.contains("Please log in as a Farmer to continue"));
}

#[tokio::test]
async fn anonymous_visitors_are_sent_to_login() {
    let mut browser = Browser::new().await;
    for role in Role::ALL {
        let response = browser.get(role.dashboard_path()).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }
}

#[tokio::test]
async fn logout_clears_the_session() {
    let mut browser = Browser::new().await;
    browser
        .register("Jaya", "jaya@example.com", "Warehouse Manager")
        .await;
    browser.login("jaya@example.com", PASSWORD).await;
    assert_eq!(
        browser.get("/warehouse/dashboard").await.status(),
        StatusCode::OK
    );

    let logout = browser.get("/logout").await;
    assert_eq!(location(&logout), "/login");
    let cleared = logout
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(cleared.contains("Max-Age=0"));
    assert!(!browser.has_session());

    let after = browser.get("/warehouse/dashboard").await;
    assert_eq!(after.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&after), "/login");
}

#[tokio::test]
async fn public_pages_and_assets_render() {
    let mut browser = Browser::new().await;
    for path in ["/", "/register", "/login"] {
        assert_eq!(browser.get(path).await.status(), StatusCode::OK, "{path}");
    }

    let stylesheet = browser.get("/static/css/style.css").await;
    assert_eq!(stylesheet.status(), StatusCode::OK);
}
