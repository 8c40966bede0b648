//! `channels` command: the channel fee model as a reference table.

use rust_decimal::Decimal;
use serde::Serialize;

use sellerops_core::ChannelType;

#[derive(Debug, Serialize)]
struct ChannelRow {
    channel: ChannelType,
    label: &'static str,
    default_commission_pct: Decimal,
    fields: Vec<&'static str>,
}

fn channel_rows() -> Vec<ChannelRow> {
    ChannelType::ALL
        .into_iter()
        .map(|channel| ChannelRow {
            channel,
            label: channel.label(),
            default_commission_pct: channel.default_commission_pct(),
            fields: channel.fields().names(),
        })
        .collect()
}

pub(crate) fn run_channels(json: bool) -> anyhow::Result<()> {
    let rows = channel_rows();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<22} {:<22} {:>10}  {}",
        "CHANNEL", "NAME", "COMMISSION", "FIELDS"
    );
    for row in rows {
        let fields = if row.fields.is_empty() {
            "-".to_string()
        } else {
            row.fields.join(", ")
        };
        println!(
            "{:<22} {:<22} {:>10}  {}",
            row.channel.as_str(),
            row.label,
            format!("{}%", row.default_commission_pct),
            fields
        );
    }
    Ok(())
}
