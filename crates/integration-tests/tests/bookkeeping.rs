//! Integration tests for order, review, and discount bookkeeping.
//!
//! These exercise the repositories directly against a migrated database;
//! no HTTP routes are involved.

#![allow(clippy::unwrap_used)]

use chrono::{Duration, Utc};

use byteshelf_core::{DiscountType, DownloadStatus, OrderDetailId, PaymentStatus, Price};
use byteshelf_integration_tests::TestApp;
use byteshelf_storefront::db::RepositoryError;
use byteshelf_storefront::db::catalog::ProductRepository;
use byteshelf_storefront::db::discounts::DiscountRepository;
use byteshelf_storefront::db::orders::OrderRepository;
use byteshelf_storefront::db::reviews::ReviewRepository;
use byteshelf_storefront::db::users::UserRepository;
use byteshelf_storefront::models::catalog::NewProduct;
use byteshelf_storefront::models::discount::NewDiscount;
use byteshelf_storefront::models::order::{NewOrder, OrderLine};
use byteshelf_storefront::models::user::User;

async fn fixture(app: &mut TestApp) -> (User, Vec<OrderLine>) {
    let user = app
        .login_as_user("buyer", "buyer@example.com", "pw pw pw pw")
        .await;

    let products = ProductRepository::new(app.pool());
    let mut lines = Vec::new();
    for (name, cents) in [("Rust Cookbook", 1999), ("Lo-fi Loop Bundle", 1299)] {
        let product = products
            .create(&NewProduct {
                name: name.to_owned(),
                description: None,
                price: Price::from_cents(cents).unwrap(),
                file_path: None,
                thumbnail: None,
                category_id: None,
                is_active: true,
            })
            .await
            .unwrap();
        lines.push(OrderLine {
            product_id: product.id,
            price: product.price,
        });
    }

    (user, lines)
}

#[tokio::test]
async fn test_order_creation_is_atomic_bookkeeping() {
    let mut app = TestApp::new().await;
    let (user, lines) = fixture(&mut app).await;
    let orders = OrderRepository::new(app.pool());

    let order = orders
        .create(&NewOrder {
            user_id: user.id,
            lines: lines.clone(),
            discount_applied: Price::from_cents(300).unwrap(),
            payment_method: Some("card".to_owned()),
            payment_id: Some("pay_123".to_owned()),
            loyalty_points_earned: 29,
            loyalty_points_used: 10,
        })
        .await
        .unwrap();

    assert_eq!(order.total.as_cents(), 1999 + 1299 - 300);
    assert_eq!(order.discount_applied.as_cents(), 300);
    assert_eq!(order.payment_status, PaymentStatus::Pending);
    assert_eq!(order.payment_id.as_deref(), Some("pay_123"));

    let details = orders.list_details(order.id).await.unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0].price.as_cents(), 1999);
    assert_eq!(details[0].download_status, DownloadStatus::NotDownloaded);

    // Loyalty balance moved with the order
    let user = UserRepository::new(app.pool())
        .get_by_id(user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.loyalty_points, 29 - 10);

    let history = orders.list_for_user(user.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, order.id);
}

#[tokio::test]
async fn test_empty_order_is_rejected() {
    let mut app = TestApp::new().await;
    let (user, _) = fixture(&mut app).await;

    let result = OrderRepository::new(app.pool())
        .create(&NewOrder {
            user_id: user.id,
            lines: vec![],
            discount_applied: Price::ZERO,
            payment_method: None,
            payment_id: None,
            loyalty_points_earned: 0,
            loyalty_points_used: 0,
        })
        .await;

    assert!(matches!(result, Err(RepositoryError::Invalid(_))));
    assert_eq!(OrderRepository::new(app.pool()).count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_record_download_updates_detail() {
    let mut app = TestApp::new().await;
    let (user, lines) = fixture(&mut app).await;
    let orders = OrderRepository::new(app.pool());

    let order = orders
        .create(&NewOrder {
            user_id: user.id,
            lines,
            discount_applied: Price::ZERO,
            payment_method: None,
            payment_id: None,
            loyalty_points_earned: 0,
            loyalty_points_used: 0,
        })
        .await
        .unwrap();

    let details = orders.list_details(order.id).await.unwrap();
    let first = details[0].id;

    let updated = orders.record_download(first).await.unwrap();
    assert_eq!(updated.download_status, DownloadStatus::Downloaded);
    assert_eq!(updated.download_count, 1);
    assert!(updated.last_download.is_some());

    // Counting is cumulative
    let updated = orders.record_download(first).await.unwrap();
    assert_eq!(updated.download_count, 2);

    let missing = orders.record_download(OrderDetailId::new(9999)).await;
    assert!(matches!(missing, Err(RepositoryError::NotFound)));
}

#[tokio::test]
async fn test_one_review_per_user_per_product() {
    let mut app = TestApp::new().await;
    let (user, lines) = fixture(&mut app).await;
    let reviews = ReviewRepository::new(app.pool());
    let product_id = lines[0].product_id;

    reviews
        .create(user.id, product_id, 5, Some("Great"))
        .await
        .unwrap();

    let second = reviews.create(user.id, product_id, 1, None).await;
    assert!(matches!(second, Err(RepositoryError::Conflict(_))));

    // A different product is fine
    reviews
        .create(user.id, lines[1].product_id, 3, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_review_rating_bounds() {
    let mut app = TestApp::new().await;
    let (user, lines) = fixture(&mut app).await;
    let reviews = ReviewRepository::new(app.pool());
    let product_id = lines[0].product_id;

    for bad in [0, 6, -1] {
        let result = reviews.create(user.id, product_id, bad, None).await;
        assert!(
            matches!(result, Err(RepositoryError::Invalid(_))),
            "rating {bad} accepted"
        );
    }
}

#[tokio::test]
async fn test_discount_redeem_counts_usage() {
    let app = TestApp::new().await;
    let now = Utc::now();
    let discounts = DiscountRepository::new(app.pool());

    discounts
        .create(&NewDiscount {
            code: "LAUNCH10".to_owned(),
            discount_type: DiscountType::Percentage,
            amount: 10,
            valid_from: now - Duration::days(1),
            valid_to: now + Duration::days(1),
            usage_limit: 2,
        })
        .await
        .unwrap();

    let first = discounts.redeem("LAUNCH10", now).await.unwrap();
    assert_eq!(first.usage_count, 1);

    let second = discounts.redeem("LAUNCH10", now).await.unwrap();
    assert_eq!(second.usage_count, 2);

    // Limit reached: the code still exists but cannot be redeemed
    let third = discounts.redeem("LAUNCH10", now).await;
    assert!(matches!(third, Err(RepositoryError::Conflict(_))));

    let stored = discounts.get_by_code("LAUNCH10").await.unwrap().unwrap();
    assert_eq!(stored.usage_count, 2);
}

#[tokio::test]
async fn test_discount_redeem_respects_validity_window() {
    let app = TestApp::new().await;
    let now = Utc::now();
    let discounts = DiscountRepository::new(app.pool());

    discounts
        .create(&NewDiscount {
            code: "EXPIRED".to_owned(),
            discount_type: DiscountType::Fixed,
            amount: 500,
            valid_from: now - Duration::days(10),
            valid_to: now - Duration::days(1),
            usage_limit: 0,
        })
        .await
        .unwrap();

    let result = discounts.redeem("EXPIRED", now).await;
    assert!(matches!(result, Err(RepositoryError::Conflict(_))));

    let missing = discounts.redeem("NO-SUCH-CODE", now).await;
    assert!(matches!(missing, Err(RepositoryError::NotFound)));
}

#[tokio::test]
async fn test_duplicate_discount_code_rejected() {
    let app = TestApp::new().await;
    let now = Utc::now();
    let discounts = DiscountRepository::new(app.pool());

    let new_discount = NewDiscount {
        code: "ONCE".to_owned(),
        discount_type: DiscountType::Fixed,
        amount: 100,
        valid_from: now,
        valid_to: now + Duration::days(1),
        usage_limit: 0,
    };

    discounts.create(&new_discount).await.unwrap();
    let duplicate = discounts.create(&new_discount).await;
    assert!(matches!(duplicate, Err(RepositoryError::Conflict(_))));
}
