//! Basic example: load CSV, filter, aggregate and forecast
//!
//! Run with: cargo run --example basic -p dashboard

use std::sync::Arc;

use analytics_facade::{ChartSelection, DatasetStore, Dimension, FilterEvent, GroupBy, Metric};
use chrono::{Duration, NaiveDate};
use dashboard::{DashboardConfig, Session};
use forecast_facade::Algorithm;

fn sample_sales() -> String {
    let mut csv = String::from("date,region,product,segment,revenue,units,discount\n");
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default();
    let regions = ["West", "East", "North"];
    let products = ["Widget", "Gadget"];
    for day in 0..400i64 {
        let date = start + Duration::days(day);
        for (r, region) in regions.iter().enumerate() {
            let product = products[(day as usize + r) % products.len()];
            let weekly = [1.1, 1.0, 0.95, 0.9, 1.05, 1.3, 0.7][day as usize % 7];
            let revenue = (400.0 + 100.0 * r as f64 + 1.5 * day as f64) * weekly;
            csv.push_str(&format!(
                "{},{},{},SMB,{:.2},{},0.05\n",
                date,
                region,
                product,
                revenue,
                5 + day % 4
            ));
        }
    }
    csv
}

const CUSTOMERS: &str = "\
segment,channel,satisfaction,customer_count
SMB,Online,4.3,250
SMB,Retail,4.0,80
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = DashboardConfig::from_env()?;
    dashboard::init_tracing(&config.log_filter);

    println!("=== Dashboard Basic Example ===\n");

    let store = DatasetStore::from_csv(sample_sales().as_bytes(), CUSTOMERS.as_bytes())?;
    let mut session = Session::new(Arc::new(store), config);

    // 1. Catalog
    let catalog = session.catalog();
    println!("1. Regions: {:?}", catalog.regions);
    println!("   Products: {:?}\n", catalog.products);

    // 2. KPIs
    let kpis = session.kpis();
    println!("2. Total revenue: {:.2}", kpis.total_revenue);
    println!("   Revenue trend: {:?}\n", kpis.revenue_trend);

    // 3. Cross-filter from a chart click
    session.select(&ChartSelection::new("region-bar", Dimension::Region, "West", 1))?;
    let by_product = session.aggregate(GroupBy::Product, Metric::Revenue)?;
    println!("3. West revenue by product:");
    for point in &by_product.points {
        println!("   {}: {:.2}", point.key, point.value.unwrap_or(0.0));
    }
    println!();

    // 4. Saved view
    session.save_view("west")?;
    session.apply(&FilterEvent::Clear)?;
    session.load_view("west")?;
    println!("4. Saved views: {:?}\n", session.list_views());

    // 5. Forecast
    println!("5. Forecast (ProphetLike, 8 weeks)");
    let result = session.forecast_using(Metric::Revenue, Algorithm::ProphetLike, 8)?;
    for point in &result.horizon_points {
        println!(
            "   {}: {:.2} [{:.2}, {:.2}]",
            point.period, point.point, point.lower, point.upper
        );
    }
    println!(
        "   Backtest MAE {:.2}, RMSE {:.2}, MAPE {:?}",
        result.backtest_metrics.mae, result.backtest_metrics.rmse, result.backtest_metrics.mape
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
