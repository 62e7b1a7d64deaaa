use chrono::NaiveDate;
use moments_storefront::clock::FixedClock;
use moments_storefront::config::StorefrontConfig;
use moments_storefront::domain::order::{OrderStatus, PaymentMethod};
use moments_storefront::forms::auth::SignUpForm;
use moments_storefront::forms::checkout::ShippingForm;
use moments_storefront::ids::SequentialIds;
use moments_storefront::services::auth;
use moments_storefront::services::cart::{self, CartSignal};
use moments_storefront::services::catalog::{self, CatalogQuery};
use moments_storefront::services::checkout::{self, CheckoutFlow, CheckoutStep};

mod common;

fn clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap(),
    )
}

#[test]
fn test_catalog_seeding_runs_once() {
    let test_store = common::TestStore::new();
    let repo = test_store.repository();

    let seeded = catalog::initialize_catalog(&repo, &clock()).unwrap();
    assert_eq!(seeded.len(), 3);

    let again = catalog::initialize_catalog(&repo, &clock()).unwrap();
    assert_eq!(again.len(), 3);
    assert_eq!(again[0].id, seeded[0].id);
}

#[test]
fn test_shopper_journey_from_catalog_to_order() {
    let test_store = common::TestStore::new();
    let repo = test_store.repository();
    let config = StorefrontConfig::without_simulated_delays();
    let clock = clock();

    catalog::initialize_catalog(&repo, &clock).unwrap();

    // Search ranks the vase first and keeps the flash-sale rail intact.
    let page = catalog::browse_catalog(&repo, CatalogQuery::new().search("crystal")).unwrap();
    assert_eq!(page.products.len(), 1);
    assert_eq!(page.products[0].name, "Elegant Crystal Vase");
    assert_eq!(page.flash_sale.len(), 2);

    let vase_id = page.products[0].id.clone();

    let update = cart::add_to_cart(&repo, &vase_id, None).unwrap();
    assert_eq!(update.signal, Some(CartSignal::OpenCart));
    let update = cart::add_to_cart(&repo, &vase_id, None).unwrap();
    assert_eq!(update.cart.line_count(), 1);
    assert_eq!(update.cart.item_count(), 2);
    assert_eq!(update.cart.total_cents(), 3000_00);

    let shopper_ids = SequentialIds::new();
    let shopper = auth::register(
        &repo,
        &shopper_ids,
        SignUpForm {
            name: "Anika Rahman".to_string(),
            email: "anika@example.com".to_string(),
            password: "secret".to_string(),
        },
    )
    .unwrap();
    assert_eq!(shopper.id, "rec-1");

    let mut flow = CheckoutFlow::start(&update.cart, Some(&shopper)).unwrap();
    assert_eq!(flow.shipping_form().name, "Anika Rahman");

    flow.submit_shipping(ShippingForm {
        name: "Anika Rahman".to_string(),
        email: "anika@example.com".to_string(),
        phone: "+8801911111111".to_string(),
        address: "House 45, Road 12, Uttara, Dhaka".to_string(),
    })
    .unwrap();
    assert_eq!(flow.step(), CheckoutStep::Payment);

    flow.select_payment(PaymentMethod::MobileBanking).unwrap();
    let summary = flow.payment_summary(&config);
    assert_eq!(summary.subtotal_cents, 3000_00);
    assert_eq!(summary.payable_cents, 3100_00);

    let order_ids = SequentialIds::new();
    let order = flow.place_order(&clock, &order_ids, &config).unwrap();
    assert_eq!(order.id, "ORD-1001");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_cents, 3000_00);
    assert_eq!(order.item_count, 2);

    let updated = checkout::complete_order(&repo, &order, &config)
        .unwrap()
        .expect("the signed-in shopper should be updated");
    assert_eq!(updated.points, 30);
    assert_eq!(updated.orders.len(), 1);
    assert_eq!(updated.orders[0].id, "ORD-1001");

    // The cart is gone and the order history survives in the session.
    assert!(cart::load_cart(&repo).unwrap().is_empty());
    let session = auth::current_session(&repo).unwrap();
    let user = session.user.expect("session user should persist");
    assert_eq!(user.points, 30);
    assert_eq!(user.orders[0].payment_method, PaymentMethod::MobileBanking);
}

#[test]
fn test_buy_now_signals_checkout_and_keeps_the_cart() {
    let test_store = common::TestStore::new();
    let repo = test_store.repository();

    catalog::initialize_catalog(&repo, &clock()).unwrap();

    let update = cart::buy_now(&repo, "2", None).unwrap();
    assert_eq!(update.signal, Some(CartSignal::OpenCheckout));
    assert_eq!(update.cart.total_cents(), 850_00);

    let persisted = cart::load_cart(&repo).unwrap();
    assert_eq!(persisted.item_count(), 1);
}

#[test]
fn test_variation_selection_flows_into_the_cart() {
    let test_store = common::TestStore::new();
    let repo = test_store.repository();

    catalog::initialize_catalog(&repo, &clock()).unwrap();

    let update = cart::add_to_cart(&repo, "1", Some("v2")).unwrap();
    assert_eq!(update.cart.lines()[0].unit_price_cents(), 1700_00);

    let details = catalog::product_details(&repo, "1").unwrap();
    let smoky = details.variation("v2").expect("variation should exist");
    assert_eq!(smoky.name, "Smoky Grey");
}
