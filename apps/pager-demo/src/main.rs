use pager_demo::app::run_scripted_session;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let page_count = pager_demo::page_count_from_env()?;

    println!("=== Pager Demo ===");
    println!("Serving {page_count} text pages; set {} to change.", pager_demo::PAGE_COUNT_VAR);
    println!("Run with RUST_LOG=debug to see window transitions.");
    println!();

    let report = run_scripted_session(page_count);

    println!();
    if report.page_count == 0 {
        println!("No pages to show");
    } else {
        println!("Finished on page {} of {}", report.final_index + 1, report.page_count);
    }
    println!("Page changes: {}", report.page_changes.len());
    println!("Views constructed: {}", report.views_constructed);
    println!("Views reused: {}", report.stats.reuse_count);
    Ok(())
}
