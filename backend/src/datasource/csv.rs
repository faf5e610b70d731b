//! CSV seed import
//!
//! Reads the three seed files into a [`Dataset`]:
//!
//! ```text
//! drivers.csv  name,shift_hours,past_week_hours      (hours separated by '|')
//! routes.csv   route_id,distance_km,traffic_level,base_time_min
//! orders.csv   order_id,value_rs,route_id
//! ```
//!
//! Columns are located by header name, so their order does not matter.
//! Fields are plain comma-separated values; quoting is not supported.
//!
//! Drivers have no ID column and are numbered `D001`, `D002`, ... in file
//! order. Orders that reference an unknown route are skipped with a warning.

use super::{positive_finite, DataSourceError, Dataset};
use crate::models::{Driver, Order, Route, TrafficLevel};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

/// One parsed CSV file: header index plus data rows
struct CsvTable<'a> {
    file: &'a str,
    columns: HashMap<&'a str, usize>,
    rows: Vec<(usize, Vec<&'a str>)>,
}

impl<'a> CsvTable<'a> {
    fn parse(file: &'a str, text: &'a str) -> Result<Self, DataSourceError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, header) = lines.next().ok_or_else(|| DataSourceError::Csv {
            file: file.to_string(),
            line: 1,
            reason: "missing header row".to_string(),
        })?;

        let columns = header
            .split(',')
            .enumerate()
            .map(|(i, name)| (name.trim(), i))
            .collect();

        let rows = lines
            .map(|(n, line)| (n, line.split(',').map(str::trim).collect()))
            .collect();

        Ok(Self {
            file,
            columns,
            rows,
        })
    }

    /// Extract a required column value from a row
    fn required(&self, line: usize, row: &[&'a str], column: &str) -> Result<&'a str, DataSourceError> {
        let index = self
            .columns
            .get(column)
            .ok_or_else(|| self.error(line, format!("missing column '{}'", column)))?;

        row.get(*index)
            .copied()
            .ok_or_else(|| self.error(line, format!("missing value for '{}'", column)))
    }

    /// Extract and parse a required column value
    fn parse_field<T: FromStr>(&self, line: usize, row: &[&'a str], column: &str) -> Result<T, DataSourceError> {
        let raw = self.required(line, row, column)?;
        raw.parse()
            .map_err(|_| self.error(line, format!("invalid {} '{}'", column, raw)))
    }

    fn error(&self, line: usize, reason: String) -> DataSourceError {
        DataSourceError::Csv {
            file: self.file.to_string(),
            line,
            reason,
        }
    }
}

/// Parse `drivers.csv` content
pub fn parse_drivers(text: &str) -> Result<Vec<Driver>, DataSourceError> {
    let table = CsvTable::parse("drivers.csv", text)?;
    let mut drivers = Vec::with_capacity(table.rows.len());

    for (index, (line, row)) in table.rows.iter().enumerate() {
        let name = table.required(*line, row, "name")?;
        let shift_hours: f64 = table.parse_field(*line, row, "shift_hours")?;
        let past_week = table.required(*line, row, "past_week_hours")?;

        let hours = past_week
            .split('|')
            .map(|h| {
                h.trim()
                    .parse::<f64>()
                    .map_err(|_| table.error(*line, format!("invalid past_week_hours entry '{}'", h)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        drivers.push(
            Driver::new(format!("D{:03}", index + 1), name.to_string())
                .with_shift_hours(shift_hours)
                .with_past_week_hours(hours),
        );
    }

    Ok(drivers)
}

/// Parse `routes.csv` content
pub fn parse_routes(text: &str) -> Result<Vec<Route>, DataSourceError> {
    let table = CsvTable::parse("routes.csv", text)?;
    let mut routes = Vec::with_capacity(table.rows.len());

    for (line, row) in &table.rows {
        let id = table.required(*line, row, "route_id")?;
        let distance_km: f64 = table.parse_field(*line, row, "distance_km")?;
        let base_time: f64 = table.parse_field(*line, row, "base_time_min")?;
        let traffic = table.required(*line, row, "traffic_level")?;
        let traffic_level =
            TrafficLevel::from_str(traffic).map_err(|reason| table.error(*line, reason))?;

        if !positive_finite(distance_km) || !positive_finite(base_time) {
            return Err(table.error(
                *line,
                "distance_km and base_time_min must be finite and positive".to_string(),
            ));
        }

        routes.push(Route::new(id.to_string(), distance_km, traffic_level, base_time));
    }

    Ok(routes)
}

/// Parse `orders.csv` content, skipping orders whose route is not known
pub fn parse_orders(text: &str, routes: &[Route]) -> Result<Vec<Order>, DataSourceError> {
    let table = CsvTable::parse("orders.csv", text)?;
    let known: HashSet<&str> = routes.iter().map(|r| r.id()).collect();
    let mut orders = Vec::with_capacity(table.rows.len());

    for (line, row) in &table.rows {
        let id = table.required(*line, row, "order_id")?;
        let value_rs: f64 = table.parse_field(*line, row, "value_rs")?;
        let route_id = table.required(*line, row, "route_id")?;

        if !known.contains(route_id) {
            warn!(order_id = id, route_id, "route not found; skipping order");
            continue;
        }
        if !positive_finite(value_rs) {
            return Err(table.error(*line, "value_rs must be finite and positive".to_string()));
        }

        orders.push(Order::new(id.to_string(), value_rs, route_id.to_string()));
    }

    Ok(orders)
}

/// Import the three seed files into a validated dataset
pub fn import_files(
    drivers_path: impl AsRef<Path>,
    routes_path: impl AsRef<Path>,
    orders_path: impl AsRef<Path>,
) -> Result<Dataset, DataSourceError> {
    let drivers = parse_drivers(&read(drivers_path.as_ref())?)?;
    let routes = parse_routes(&read(routes_path.as_ref())?)?;
    let orders = parse_orders(&read(orders_path.as_ref())?, &routes)?;

    info!(
        drivers = drivers.len(),
        routes = routes.len(),
        orders = orders.len(),
        "seed files imported"
    );

    Dataset::new(drivers, routes, orders)
}

fn read(path: &Path) -> Result<String, DataSourceError> {
    fs::read_to_string(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_ids_follow_file_order() {
        let drivers = parse_drivers(
            "name,shift_hours,past_week_hours\nAmit,6,6|8|7|7|7|6|10\nPriya,6,10|9|6|6|6|7|8\n",
        )
        .unwrap();

        assert_eq!(drivers[0].id(), "D001");
        assert_eq!(drivers[1].id(), "D002");
        assert_eq!(drivers[0].past_7_day_work_hours().len(), 7);
        assert_eq!(drivers[0].current_shift_hours(), 6.0);
    }

    #[test]
    fn test_bad_traffic_level_reports_line() {
        let err = parse_routes("route_id,distance_km,traffic_level,base_time_min\n1,25,Gridlock,125\n")
            .unwrap_err();

        match err {
            DataSourceError::Csv { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_infinite_cells_rejected() {
        let err = parse_routes("route_id,distance_km,traffic_level,base_time_min\n1,inf,Low,60\n")
            .unwrap_err();
        assert!(matches!(err, DataSourceError::Csv { line: 2, .. }));

        let routes = vec![Route::new("1".to_string(), 5.0, TrafficLevel::Low, 30.0)];
        let err = parse_orders("order_id,value_rs,route_id\n1,infinity,1\n", &routes).unwrap_err();
        assert!(matches!(err, DataSourceError::Csv { line: 2, .. }));
    }

    #[test]
    fn test_column_order_is_irrelevant() {
        let routes = parse_routes("base_time_min,traffic_level,route_id,distance_km\n40,High,7,12\n").unwrap();
        assert_eq!(routes[0].id(), "7");
        assert_eq!(routes[0].distance_km(), 12.0);
        assert_eq!(routes[0].base_time_minutes(), 40.0);
    }
}
