use capflags::domain::FlagValue;
use capflags::probe::ProbeValue;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Write};

/// What the inspector prints.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub flags: BTreeMap<String, FlagValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probes: Option<BTreeMap<String, ProbeValue>>,
}

impl Report {
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Aligned `name kind value` table.
    #[must_use]
    pub fn to_table(&self) -> String {
        let width = self.flags.keys().map(String::len).max().unwrap_or(0).max("Flag".len());
        let mut out = String::new();

        let _ = writeln!(out, "{:<width$}  {:<6}  Value", "Flag", "Kind");
        let _ = writeln!(out, "{:-<1$}", "", width + 15);
        for (name, value) in &self.flags {
            let _ = writeln!(out, "{name:<width$}  {:<6}  {value}", value.kind().as_str());
        }

        if let Some(probes) = &self.probes {
            let _ = writeln!(out, "\nHardware probes:");
            for (probe, value) in probes {
                let _ = writeln!(out, "{probe:<width$}  {value}");
            }
        }

        out
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_table())
    }
}
