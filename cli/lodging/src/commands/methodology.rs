//! `lodging methodology`: list committees and their quorums.

use anyhow::{bail, Result};
use lodging_core::{Committee, Registry};

/// Print every committee, or only the one for `quantity`.
pub fn run(registry: &Registry, quantity: Option<&str>) -> Result<()> {
    print!("{}", render(registry, quantity)?);
    Ok(())
}

pub fn render(registry: &Registry, quantity: Option<&str>) -> Result<String> {
    let mut committees: Vec<&Committee> = match quantity {
        Some(name) => match registry.committee(name) {
            Some(c) => vec![c],
            None if registry.quantity(name).is_some() => {
                bail!("'{name}' has no committee; it can only be supplied as input")
            }
            None => bail!("unknown quantity '{name}'"),
        },
        None => registry.committees().collect(),
    };
    committees.sort_by(|a, b| a.quantity().cmp(b.quantity()));

    let mut out = String::new();
    for committee in committees {
        let name = committee.quantity();
        match registry.quantity(name) {
            Some(q) => {
                let unit = q.unit.as_deref().map(|u| format!(" [{u}]")).unwrap_or_default();
                out.push_str(&format!("{name}{unit}: {}\n", q.description));
            }
            None => out.push_str(&format!("{name}\n")),
        }
        for (i, quorum) in committee.quorums().iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, quorum.label()));
            if !quorum.required().is_empty() {
                out.push_str(&format!("     needs:       {}\n", quorum.required().join(", ")));
            }
            if !quorum.optional().is_empty() {
                out.push_str(&format!("     appreciates: {}\n", quorum.optional().join(", ")));
            }
            let complies = if quorum.compliance().is_empty() {
                "(none)".to_string()
            } else {
                quorum
                    .compliance()
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            out.push_str(&format!("     complies:    {complies}\n"));
        }
        out.push('\n');
    }
    Ok(out)
}
