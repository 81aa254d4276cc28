use super::event::TrackerEvent;
use super::providers::ValueProviders;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Prints every registered placeholder next to its default-format value for `event`.
    pub fn providers(providers: &ValueProviders, event: TrackerEvent) {
        let mut table = Table::new();

        table.add_row(row!["PLACEHOLDER", "VALUE"]);
        for name in providers.names() {
            let value = match providers.resolve(name, event, "") {
                Some(Ok(value)) => value,
                Some(Err(e)) => format!("<{}>", e),
                None => String::new(),
            };
            table.add_row(row![format!("%{}%", name), value]);
        }
        table.printstd();
    }
}
