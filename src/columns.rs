//! Default listing columns and user-facing messages for each domain.

use serde_json::Value;

use crate::domain::Domain;
use crate::domain::row::RowViewModel;
use crate::table::{CellContent, CellContext, HeaderDescriptor};

pub type Header = HeaderDescriptor<RowViewModel>;

/// Shown in place of the table body when a page has no rows.
pub fn empty_message(domain: Domain) -> String {
    format!("No {} found.", domain.plural_label())
}

/// Shown in place of the table body when a fetch fails.
pub fn error_message(domain: Domain) -> String {
    format!("Unable to load {}.", domain.plural_label())
}

/// Formats a dollar amount with thousands separators, e.g. `$1,234.50`.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}${grouped}.{:02}", cents % 100)
}

fn currency_cell(_: &RowViewModel, ctx: &CellContext<'_>) -> CellContent {
    match ctx.value.and_then(Value::as_f64) {
        Some(amount) => CellContent::Text(format_currency(amount)),
        None => CellContent::Empty,
    }
}

fn client_cell(row: &RowViewModel, _: &CellContext<'_>) -> CellContent {
    let Some(client) = row.client.as_deref() else {
        return CellContent::Empty;
    };
    match row.meta.get("email").and_then(Value::as_str) {
        Some(email) if !email.is_empty() => CellContent::Html(format!(
            "<div>{}</div><small>{}</small>",
            ammonia::clean_text(client),
            ammonia::clean_text(email)
        )),
        _ => CellContent::Text(client.to_string()),
    }
}

fn id() -> Header {
    Header::new("id", "#").cell_class("text-nowrap")
}

fn client() -> Header {
    Header::new("client", "Client").render(client_cell)
}

fn status() -> Header {
    Header::new("status", "Status").cell_class("text-nowrap")
}

fn currency(key: &str, label: &str) -> Header {
    Header::new(key, label)
        .header_class("text-end")
        .cell_class("text-end")
        .render(currency_cell)
}

/// Column set rendered for a domain's listing table.
pub fn default_headers(domain: Domain) -> Vec<Header> {
    match domain {
        Domain::Inquiry => vec![
            id(),
            client(),
            Header::new("created", "Created"),
            Header::new("service", "Service"),
            Header::new("source", "Source"),
            Header::new("accountType", "Account type"),
            Header::new("serviceman", "Serviceman"),
            status(),
        ],
        Domain::Quote => vec![
            id(),
            client(),
            Header::new("quoteNumber", "Quote #"),
            Header::new("quoteDate", "Quoted"),
            Header::new("dateQuotedAccepted", "Accepted"),
            currency("quoteTotal", "Total"),
            Header::new("serviceman", "Serviceman"),
            status(),
        ],
        Domain::Job => vec![
            id(),
            client(),
            Header::new("service", "Service"),
            Header::new("dateBooked", "Booked"),
            Header::new("requiredBy", "Required by"),
            currency("jobTotal", "Total"),
            Header::new("serviceman", "Serviceman"),
            status(),
        ],
        Domain::Payment => vec![
            id(),
            client(),
            Header::new("invoiceNumber", "Invoice #"),
            Header::new("invoiceDate", "Invoiced"),
            Header::new("dueDate", "Due"),
            currency("invoiceTotal", "Total"),
            currency("amountPaid", "Paid"),
            currency("balanceDue", "Balance"),
            status(),
        ],
        Domain::ActiveJob => vec![
            id(),
            client(),
            Header::new("service", "Service"),
            Header::new("dateStarted", "Started"),
            currency("jobTotal", "Total"),
            Header::new("recommendation", "Recommendation"),
            Header::new("serviceman", "Serviceman"),
            status(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::format::reference_offset;
    use crate::table::{TableConfig, render};
    use crate::mapper::{
        ActiveJobMapper, InquiryMapper, JobMapper, PaymentMapper, QuoteMapper, RowMapper,
    };

    #[test]
    fn messages_name_the_domain() {
        assert_eq!(empty_message(Domain::Quote), "No quotes found.");
        assert_eq!(empty_message(Domain::ActiveJob), "No active jobs found.");
        assert_eq!(error_message(Domain::Payment), "Unable to load payments.");
    }

    #[test]
    fn currency_formatting() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-99.999), "-$100.00");
    }

    #[test]
    fn every_column_key_is_a_mapped_target() {
        let offset = reference_offset(600);
        let targets: Vec<(Domain, Vec<&'static str>)> = vec![
            (Domain::Inquiry, InquiryMapper::new(offset).table().targets().collect()),
            (Domain::Quote, QuoteMapper::new(offset).table().targets().collect()),
            (Domain::Job, JobMapper::new(offset).table().targets().collect()),
            (Domain::Payment, PaymentMapper::new(offset).table().targets().collect()),
            (Domain::ActiveJob, ActiveJobMapper::new(offset).table().targets().collect()),
        ];
        for (domain, targets) in targets {
            for header in default_headers(domain) {
                let derived = domain == Domain::Payment && header.key == "balanceDue";
                assert!(
                    derived || header.key == "client" || targets.contains(&header.key.as_str()),
                    "{domain}: column {} has no mapped target",
                    header.key
                );
            }
        }
    }

    #[test]
    fn client_column_shows_email_under_name() {
        let mut row = RowViewModel {
            client: Some("Ada <Lovelace>".into()),
            ..RowViewModel::default()
        };
        row.meta.insert("email", json!("ada@example.com"));
        let headers = vec![client()];
        let rows = vec![row, RowViewModel::default()];
        let table = render(&TableConfig::new(&headers, &rows, "none"));

        assert_eq!(
            table.tbody[0].cells[0].content,
            CellContent::Html("<div>Ada &lt;Lovelace&gt;</div><small>ada@example.com</small>".into())
        );
        assert_eq!(table.tbody[1].cells[0].content, CellContent::Empty);
    }
}
