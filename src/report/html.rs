//! `index.html`: a static compliance dashboard with a Chart.js doughnut

use crate::inventory::{ComplianceSummary, InventoryRecord};

const COLOR_COMPLIANT: &str = "#28a745";
const COLOR_NON_COMPLIANT: &str = "#dc3545";

/// Render the dashboard page
pub fn render_dashboard(records: &[InventoryRecord], generated_at: &str) -> String {
    let summary = ComplianceSummary::from_records(records);
    let status_color = if summary.is_passing() {
        COLOR_COMPLIANT
    } else {
        COLOR_NON_COMPLIANT
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>NIST 800-53 Compliance Dashboard</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <style>
        body {{ font-family: 'Segoe UI', sans-serif; text-align: center; background: #f0f2f5; padding-top: 50px; }}
        .container {{ width: 600px; margin: auto; background: white; padding: 30px; border-radius: 15px; box-shadow: 0 10px 30px rgba(0,0,0,0.1); }}
        .status-box {{ font-size: 2.5em; font-weight: bold; color: {status_color}; margin: 20px 0; }}
        .legend {{ display: flex; justify-content: space-around; margin-top: 20px; font-weight: bold; }}
        .compliant {{ color: {compliant_color}; }}
        .non-compliant {{ color: {non_compliant_color}; }}
        table {{ width: 100%; border-collapse: collapse; margin-top: 25px; text-align: left; font-size: 0.9em; }}
        th, td {{ padding: 6px 8px; border-bottom: 1px solid #e2e8f0; }}
        footer {{ margin-top: 20px; color: #718096; font-size: 0.8em; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>Unified Compliance Dashboard</h1>
        <canvas id="complianceChart"></canvas>
        <div class="status-box">{score:.1}% Score</div>
        <div class="legend">
            <div class="compliant">Compliant: {compliant}</div>
            <div class="non-compliant">Non-Compliant: {non_compliant}</div>
        </div>
        {findings_section}
        <footer>Generated at {generated_at}</footer>
    </div>
    <script>
        const ctx = document.getElementById('complianceChart').getContext('2d');
        new Chart(ctx, {{
            type: 'doughnut',
            data: {{
                labels: ['Compliant', 'Non-Compliant'],
                datasets: [{{
                    data: [{compliant}, {non_compliant}],
                    backgroundColor: ['{compliant_color}', '{non_compliant_color}'],
                }}]
            }},
            options: {{ cutout: '70%' }}
        }});
    </script>
</body>
</html>
"#,
        status_color = status_color,
        compliant_color = COLOR_COMPLIANT,
        non_compliant_color = COLOR_NON_COMPLIANT,
        score = summary.score,
        compliant = summary.compliant,
        non_compliant = summary.non_compliant,
        findings_section = generate_findings_html(records),
        generated_at = html_escape(generated_at),
    )
}

fn generate_findings_html(records: &[InventoryRecord]) -> String {
    let rows: Vec<String> = records
        .iter()
        .filter(|r| !r.is_compliant())
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&r.namespace),
                html_escape(&r.asset_name),
                html_escape(&r.status),
                html_escape(&r.reason)
            )
        })
        .collect();

    if rows.is_empty() {
        return String::new();
    }

    format!(
        r#"<table>
            <thead>
                <tr><th>Namespace</th><th>Asset</th><th>Status</th><th>Reason</th></tr>
            </thead>
            <tbody>
                {rows}
            </tbody>
        </table>"#,
        rows = rows.join("\n                ")
    )
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::summary::testing::record;

    #[test]
    fn test_dashboard_counts_and_score() {
        let records = vec![
            record("a", "ns", true),
            record("b", "ns", true),
            record("c", "ns", false),
        ];
        let html = render_dashboard(&records, "2026-10-18 09:30:00");

        assert!(html.contains("<title>NIST 800-53 Compliance Dashboard</title>"));
        assert!(html.contains("66.7% Score"));
        assert!(html.contains("Compliant: 2"));
        assert!(html.contains("Non-Compliant: 1"));
        assert!(html.contains("data: [2, 1]"));
        assert!(html.contains("cutout: '70%'"));
        assert!(html.contains("color: #dc3545; margin: 20px 0;"));
        assert!(html.contains("<td>c</td>"));
    }

    #[test]
    fn test_fully_compliant_is_green() {
        let html = render_dashboard(&[record("a", "ns", true)], "now");
        assert!(html.contains("100.0% Score"));
        assert!(html.contains("color: #28a745; margin: 20px 0;"));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_empty_inventory() {
        let html = render_dashboard(&[], "now");
        assert!(html.contains("0.0% Score"));
        assert!(html.contains("data: [0, 0]"));
        assert!(html.contains("color: #dc3545; margin: 20px 0;"));
    }

    #[test]
    fn test_values_are_escaped() {
        let mut r = record("<script>", "ns", false);
        r.reason = "Policy Violation: a&b".to_string();
        let html = render_dashboard(&[r], "now");
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a&amp;b"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }
}
