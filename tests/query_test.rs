use anyhow::Result;
use porgo::application::AppError;

mod common;
use common::{record_fixture_sales, test_service};

#[tokio::test]
async fn test_query_empty_pattern_is_rejected() -> Result<()> {
    let (service, _temp) = test_service().await?;

    assert!(matches!(
        service.query_by_name("").await,
        Err(AppError::EmptyQuery)
    ));
    assert!(matches!(
        service.query_by_name("   ").await,
        Err(AppError::EmptyQuery)
    ));

    Ok(())
}

#[tokio::test]
async fn test_query_matches_substring_newest_first() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.add_sale("张三", 10.0, 18.0).await?;
    service.add_sale("李四", 5.0, 20.0).await?;
    service.add_sale("张三丰", 2.0, 18.0).await?;

    let result = service.query_by_name("张三").await?;
    assert_eq!(result.sales.len(), 2);
    // Newest first by id
    assert!(result.sales[0].id > result.sales[1].id);
    assert_eq!(result.sales[0].customer_name, "张三丰");
    assert_eq!(result.sales[1].customer_name, "张三");
    assert_eq!(result.customer_names, vec!["张三丰", "张三"]);

    Ok(())
}

#[tokio::test]
async fn test_query_is_case_sensitive() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.add_sale("Alice", 10.0, 18.0).await?;
    service.add_sale("alice", 5.0, 20.0).await?;

    let upper = service.query_by_name("Alice").await?;
    assert_eq!(upper.sales.len(), 1);
    assert_eq!(upper.sales[0].customer_name, "Alice");

    let lower = service.query_by_name("alice").await?;
    assert_eq!(lower.sales.len(), 1);
    assert_eq!(lower.sales[0].customer_name, "alice");

    Ok(())
}

#[tokio::test]
async fn test_query_no_matches() -> Result<()> {
    let (service, _temp) = test_service().await?;
    record_fixture_sales(&service).await?;

    let result = service.query_by_name("nobody").await?;
    assert!(result.sales.is_empty());
    assert!(result.customer_names.is_empty());
    assert!(result.summary.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_query_does_not_match_like_wildcards() -> Result<()> {
    let (service, _temp) = test_service().await?;
    record_fixture_sales(&service).await?;

    // '%' and '_' are plain characters here, not wildcards
    assert!(service.query_by_name("%").await?.sales.is_empty());
    assert!(service.query_by_name("_").await?.sales.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_query_scenario_with_running_totals() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let first = service.add_sale("A", 10.0, 18.0).await?;
    assert_eq!(first.total_price, 180.0);
    let second = service.add_sale("A", 5.0, 20.0).await?;
    assert_eq!(second.total_price, 100.0);

    let result = service.query_by_name("A").await?;
    assert_eq!(result.sales.len(), 2);
    assert_eq!(result.summary.total_weight, 15.0);
    assert_eq!(result.summary.total_amount, 280.0);
    assert_eq!(result.summary.total_unpaid_amount, 280.0);

    // Settling the first sale leaves only the second outstanding
    service.toggle_status(first.id).await?;
    let result = service.query_by_name("A").await?;
    assert_eq!(result.summary.total_amount, 280.0);
    assert_eq!(result.summary.total_unpaid_amount, 100.0);

    Ok(())
}

#[tokio::test]
async fn test_query_summary_covers_only_matches() -> Result<()> {
    let (service, _temp) = test_service().await?;
    record_fixture_sales(&service).await?;

    let result = service.query_by_name("B").await?;
    assert_eq!(result.sales.len(), 1);
    assert_eq!(result.summary.total_weight, 2.0);
    assert_eq!(result.summary.total_amount, 36.0);

    Ok(())
}
