//! Text rendering for plans, trees and lock files

use super::styling::StyleManager;
use crate::graph::{DependencyNode, DependencyTree};
use crate::lockfile::{InstalledSkillRecord, LockFile};
use crate::plan::InstallPlan;
use std::fmt::Write;
use std::path::Path;

/// Install order, dependency count and external-service advisory
pub fn render_plan(plan: &InstallPlan, styles: &StyleManager) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}",
        styles.format_info(&format!(
            "Install plan for {} ({} {})",
            styles.style_emphasis(&plan.root),
            plan.transitive_count,
            if plan.transitive_count == 1 {
                "dependency"
            } else {
                "dependencies"
            }
        ))
    );

    if plan.is_up_to_date() {
        let _ = writeln!(
            out,
            "{}",
            styles.format_success("Everything is already installed")
        );
    } else {
        for (i, name) in plan.to_install.iter().enumerate() {
            let version = plan
                .tree
                .find(name)
                .map(|node| node.version.as_str())
                .unwrap_or("?");
            let _ = writeln!(
                out,
                "  {:>2}. {} {}",
                i + 1,
                name,
                styles.style_subtle(version)
            );
        }
    }

    let skipped = plan.order.len() - plan.to_install.len();
    if skipped > 0 {
        let _ = writeln!(
            out,
            "{}",
            styles.style_subtle(&format!("  {} already installed", skipped))
        );
    }

    if let Some(advisory) = plan.service_advisory() {
        let _ = writeln!(out, "{}", styles.format_warning(&advisory));
    }

    out
}

/// Indented tree view, one node per line
pub fn render_tree(tree: &DependencyTree, styles: &StyleManager) -> String {
    let mut out = String::new();
    write_node(&mut out, &tree.root, styles);

    let _ = writeln!(
        out,
        "{}",
        styles.style_subtle(&format!(
            "{} nodes, max depth {}, {} already installed",
            tree.total_count, tree.max_depth, tree.installed_count
        ))
    );

    for service in &tree.external_services {
        let _ = writeln!(
            out,
            "{}",
            styles.format_warning(&format!("external service: {}", service))
        );
    }

    out
}

fn write_node(out: &mut String, node: &DependencyNode, styles: &StyleManager) {
    let marker = if node.installed {
        format!(" {}", styles.style_success("(installed)"))
    } else {
        String::new()
    };
    let _ = writeln!(
        out,
        "{}{}@{}{}",
        "  ".repeat(node.depth),
        node.name,
        node.version,
        marker
    );
    for child in &node.children {
        write_node(out, child, styles);
    }
}

/// Lock file summary with nested dependency records
pub fn render_lock(lock: &LockFile, path: &Path, styles: &StyleManager) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}",
        styles.format_info(&format!("Lock file: {}", path.display()))
    );
    let _ = writeln!(
        out,
        "  install location: {}",
        lock.install_location.display()
    );
    let _ = writeln!(out, "  format version: {}", lock.lockfile_version);

    if lock.skills.is_empty() {
        let _ = writeln!(out, "{}", styles.style_subtle("  no skills recorded"));
        return out;
    }

    for record in &lock.skills {
        write_record(&mut out, record, 1, styles);
    }
    out
}

fn write_record(out: &mut String, record: &InstalledSkillRecord, level: usize, styles: &StyleManager) {
    let kind = if record.is_direct { "direct" } else { "transitive" };
    let _ = writeln!(
        out,
        "{}{}@{} {}",
        "  ".repeat(level),
        record.name,
        record.version,
        styles.style_subtle(&format!("[{}] {}", kind, record.storage_ref))
    );
    for dependency in &record.dependencies {
        write_record(out, dependency, level + 1, styles);
    }
}

#[cfg(test)]
mod tests {
    include!("render.test.rs");
}
