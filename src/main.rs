use log::{debug, error, log_enabled, Level};
use std::{env, io};

use tally::chart::{scatter_points, ANNOTATED_ITEMS};
use tally::reader::read_sales_from_path;
use tally::Tally;

const DEFAULT_INPUT: &str = "finance_liquor_sales_2016_to_2019.csv";

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.len() > 2 {
        error!("At most one argument is supported");
        std::process::exit(1);
    }
    let file_path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_INPUT);

    let records = match read_sales_from_path(file_path) {
        Ok(records) => records,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };

    let mut tally = Tally::new();
    tally.consume(records.into_iter());

    if log_enabled!(Level::Debug) {
        for point in scatter_points(&tally.most_popular_per_zip(), ANNOTATED_ITEMS)
            .iter()
            .filter(|point| point.label.is_some())
        {
            debug!(
                "top seller in {}: {:?} ({} bottles)",
                point.zip_code, point.label, point.bottles_sold
            );
        }
    }

    if let Err(err) = tally.write_results(io::stdout()) {
        error!("{}", err);
        std::process::exit(1);
    }
}
