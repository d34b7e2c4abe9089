/// Display decade for a release year: `1994` becomes `"1990s"`.
pub fn decade_for_year(year: i64) -> String {
    format!("{}s", year.div_euclid(10) * 10)
}
