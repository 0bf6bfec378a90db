/// Greedy actions laid out row by row, `-1` marks states never visited.
pub fn format_policy_grid(policy: &[Option<usize>], ncol: usize) -> String {
    if ncol == 0 {
        return String::new();
    }
    policy
        .chunks(ncol)
        .map(|row| {
            row.iter()
                .map(|a| match a {
                    Some(a) => format!("{:>2}", a),
                    None => "-1".to_string(),
                })
                .collect::<Vec<String>>()
                .join(" ")
        })
        .collect::<Vec<String>>()
        .join("\n")
}

pub fn format_value_grid(values: &[f64], ncol: usize) -> String {
    if ncol == 0 {
        return String::new();
    }
    values
        .chunks(ncol)
        .map(|row| {
            row.iter()
                .map(|v| format!("{:>7.2}", v))
                .collect::<Vec<String>>()
                .join(" ")
        })
        .collect::<Vec<String>>()
        .join("\n")
}
