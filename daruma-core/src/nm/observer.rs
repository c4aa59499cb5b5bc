//! Read-only view of active NetworkManager connections
//!
//! Parses the terse (`-t`) output of `nmcli connection show --active`.
//! Terse mode separates fields with `:` and escapes literal colons and
//! backslashes inside values, so splitting has to honor `\:` and `\\`.

use crate::error::NmError;
use crate::nm::command::{CommandRunner, NmCommand};

/// One row of `nmcli -f NAME,TYPE,STATE -t connection show --active`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub name: String,
    pub link_type: String,
    pub state: String,
}

impl ConnectionRecord {
    /// Whether this record is fully activated (not activating, not
    /// deactivating)
    pub fn is_activated(&self) -> bool {
        self.state == "activated"
    }

    /// Whether this record represents a physical link
    ///
    /// nmcli reports D-Bus style type names such as `802-3-ethernet` and
    /// `802-11-wireless`; matching on the suffix also accepts the plain
    /// `ethernet`/`wireless` spellings.
    pub fn is_physical_link(&self) -> bool {
        self.link_type.ends_with("ethernet") || self.link_type.ends_with("wireless")
    }
}

/// Split one terse-mode line into fields, honoring backslash escapes
fn split_terse(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                // An escape applies to whatever follows; a trailing lone
                // backslash is kept literally
                match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => current.push('\\'),
                }
            }
            ':' => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

/// Parse the full terse listing into records, discarding malformed lines
pub fn parse_active_list(output: &str) -> Vec<ConnectionRecord> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let fields = split_terse(line);
            if fields.len() != 3 {
                tracing::debug!(line, "skipping malformed nmcli row");
                return None;
            }

            let mut fields = fields.into_iter();
            Some(ConnectionRecord {
                name: fields.next().unwrap_or_default(),
                link_type: fields.next().unwrap_or_default(),
                state: fields.next().unwrap_or_default(),
            })
        })
        .collect()
}

/// Queries NetworkManager for the set of active connections
///
/// Holds no state between calls; every query goes back to nmcli so the
/// answer always reflects the present, not a cached snapshot.
pub struct Observer<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> Observer<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Names of activated connections, in nmcli's reporting order
    ///
    /// With `physical_only` set, the list is narrowed to ethernet and
    /// wireless links, which is the gate for "do we have a carrier to
    /// put a VPN on top of".
    pub async fn list_active(&self, physical_only: bool) -> Result<Vec<String>, NmError> {
        let output = self.runner.run(&NmCommand::list_active()).await?;

        Ok(parse_active_list(&output)
            .into_iter()
            .filter(|record| record.is_activated())
            .filter(|record| !physical_only || record.is_physical_link())
            .map(|record| record.name)
            .collect())
    }

    /// Whether the named connection is currently activated
    pub async fn is_active(&self, id: &str) -> Result<bool, NmError> {
        Ok(self.list_active(false).await?.iter().any(|name| name == id))
    }
}
