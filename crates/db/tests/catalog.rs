//! Integration tests for the product and customer repositories: CRUD,
//! soft-delete visibility, low-stock listing, and the guarded stock
//! decrement.

use essenza_core::catalog::{Category, Size};
use essenza_db::models::customer::{CreateCustomer, UpdateCustomer};
use essenza_db::models::product::{CreateProduct, UpdateProduct};
use essenza_db::repositories::{CustomerRepo, ProductRepo};
use sqlx::PgPool;

fn new_product(brand: &str, fragrance: &str, stock_1oz: i32, stock_2oz: i32) -> CreateProduct {
    CreateProduct {
        brand: brand.to_string(),
        fragrance: fragrance.to_string(),
        category: Category::Masculino,
        stock_1oz,
        stock_2oz,
        price_1oz: 15000,
        price_2oz: 25000,
        min_stock: 5,
    }
}

fn new_customer(name: &str, phone: Option<&str>) -> CreateCustomer {
    CreateCustomer {
        name: name.to_string(),
        phone: phone.map(str::to_string),
        ..CreateCustomer::default()
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_create_and_fetch(pool: PgPool) {
    let created = ProductRepo::create(&pool, &new_product("Versace", "Eros", 38, 22))
        .await
        .unwrap();

    assert_eq!(created.brand, "Versace");
    assert_eq!(created.category, Category::Masculino);
    assert_eq!(created.stock_for(Size::OneOz), 38);
    assert_eq!(created.price_for(Size::TwoOz), 25000);
    assert!(created.is_active);

    let fetched = ProductRepo::find_by_id(&pool, created.id).await.unwrap();
    assert_eq!(fetched.unwrap().fragrance, "Eros");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_products_are_hidden_from_listing(pool: PgPool) {
    let keep = ProductRepo::create(&pool, &new_product("Dior", "Fahrenheit", 10, 10))
        .await
        .unwrap();
    let gone = ProductRepo::create(&pool, &new_product("Hugo Boss", "Boss", 10, 10))
        .await
        .unwrap();

    assert!(ProductRepo::deactivate(&pool, gone.id).await.unwrap());
    // Second deactivation is a no-op.
    assert!(!ProductRepo::deactivate(&pool, gone.id).await.unwrap());

    let active = ProductRepo::list(&pool, false).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, keep.id);

    let all = ProductRepo::list(&pool, true).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn low_stock_listing_is_threshold_inclusive(pool: PgPool) {
    // 1oz at the threshold.
    let low = ProductRepo::create(&pool, &new_product("Creed", "Adventus", 5, 20))
        .await
        .unwrap();
    // Both sizes healthy.
    ProductRepo::create(&pool, &new_product("Chanel", "Allure Sport", 22, 14))
        .await
        .unwrap();
    // Undersupplied but inactive: must not appear.
    let inactive = ProductRepo::create(&pool, &new_product("Tom Ford", "Oud Wood", 0, 0))
        .await
        .unwrap();
    ProductRepo::deactivate(&pool, inactive.id).await.unwrap();

    let listed = ProductRepo::list_low_stock(&pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, low.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_update_patches_only_supplied_fields(pool: PgPool) {
    let created = ProductRepo::create(&pool, &new_product("Paco Rabanne", "1 million", 50, 30))
        .await
        .unwrap();

    let updated = ProductRepo::update(
        &pool,
        created.id,
        &UpdateProduct {
            price_1oz: Some(18000),
            min_stock: Some(8),
            ..UpdateProduct::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.price_1oz, 18000);
    assert_eq!(updated.min_stock, 8);
    assert_eq!(updated.brand, "Paco Rabanne");
    assert_eq!(updated.stock_1oz, 50);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn guarded_decrement_refuses_oversubscription(pool: PgPool) {
    let product = ProductRepo::create(&pool, &new_product("Versace", "Dylan Blue", 4, 10))
        .await
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();

    // More than available: refused, stock untouched.
    assert!(
        !ProductRepo::decrement_stock(&mut conn, product.id, Size::OneOz, 5)
            .await
            .unwrap()
    );
    // Exactly available: accepted, stock reaches zero but never below.
    assert!(
        ProductRepo::decrement_stock(&mut conn, product.id, Size::OneOz, 4)
            .await
            .unwrap()
    );

    let after = ProductRepo::find_by_id(&pool, product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.stock_1oz, 0);
    assert_eq!(after.stock_2oz, 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn customer_phone_lookup_and_listing(pool: PgPool) {
    let maria = CustomerRepo::create(&pool, &new_customer("María González", Some("3001234567")))
        .await
        .unwrap();
    CustomerRepo::create(&pool, &new_customer("Carlos Rodríguez", Some("3009876543")))
        .await
        .unwrap();

    let found = CustomerRepo::find_by_phone(&pool, "3001234567")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, maria.id);

    assert!(CustomerRepo::find_by_phone(&pool, "3000000000")
        .await
        .unwrap()
        .is_none());

    let everyone = CustomerRepo::list(&pool, false).await.unwrap();
    assert_eq!(everyone.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn vip_flag_is_staff_set_and_filters_listing(pool: PgPool) {
    let ana = CustomerRepo::create(&pool, &new_customer("Ana Martínez", Some("3005555555")))
        .await
        .unwrap();
    CustomerRepo::create(&pool, &new_customer("Luis Pérez", None))
        .await
        .unwrap();

    CustomerRepo::update(
        &pool,
        ana.id,
        &UpdateCustomer {
            is_vip: Some(true),
            ..UpdateCustomer::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    let vips = CustomerRepo::list(&pool, true).await.unwrap();
    assert_eq!(vips.len(), 1);
    assert_eq!(vips[0].id, ana.id);
    assert!(vips[0].is_vip);
}
