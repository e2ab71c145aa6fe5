//! Human-readable cards for formulas and validation results.

use aether_core::{FormulaResponse, NoteType, ValidationResult};

const MAX_NAME_WIDTH: usize = 40;

// ── Public API ──

/// Print a formula as a vertical card: summary, pyramid, then ingredients by note class.
pub fn print_formula_card(formula: &FormulaResponse) {
    println!("=== {} ===", formula.name);
    if !formula.description.is_empty() {
        println!("{}", formula.description);
    }
    println!();

    println!("Summary");
    println!("  {:<26} {}", "formula_id", formula.formula_id);
    println!("  {:<26} {:?}", "source", formula.source);
    println!("  {:<26} {:.1}", "longevity_score", formula.longevity_score);
    println!("  {:<26} {:.1}", "projection_score", formula.projection_score);
    println!("  {:<26} {:.1}", "sustainability_score", formula.sustainability_score);
    println!(
        "  {:<26} {}",
        "ifra_compliant",
        if formula.ifra_compliant { "yes" } else { "no" }
    );
    println!();

    println!("Note Pyramid");
    println!("  {:<26} {:.1}%", "top", formula.note_pyramid.top);
    println!("  {:<26} {:.1}%", "middle", formula.note_pyramid.middle);
    println!("  {:<26} {:.1}%", "base", formula.note_pyramid.base);
    println!();

    for note in [NoteType::Top, NoteType::Middle, NoteType::Base] {
        print_note_section(formula, note);
    }

    if !formula.physio_corrections_applied.is_empty() {
        println!("Skin Corrections");
        for correction in &formula.physio_corrections_applied {
            println!("  - {correction}");
        }
        println!();
    }
}

pub fn print_validation_card(result: &ValidationResult) {
    println!(
        "=== {} ===",
        if result.compliant {
            "COMPLIANT"
        } else {
            "NOT COMPLIANT"
        }
    );
    println!(
        "  {:<26} {:.2}% (limit {:.1}%)",
        "allergen_total", result.allergen_total_pct, result.allergen_limit_pct
    );
    println!();

    print_messages("Violations", &result.violations);
    print_messages("Warnings", &result.warnings);
}

// ── Sections ──

fn print_note_section(formula: &FormulaResponse, note: NoteType) {
    let lines: Vec<_> = formula
        .ingredients
        .iter()
        .filter(|i| i.note_type == note)
        .collect();
    if lines.is_empty() {
        return;
    }

    println!("{} Notes ({})", capitalise(note.as_str()), lines.len());
    for ing in lines {
        print!("  {:<26} {:>6.2}%", truncate(&ing.name), ing.concentration);
        if ing.logp > 0.0 {
            print!("  logP {:.2}", ing.logp);
        }
        println!();
    }
    println!();
}

fn print_messages(header: &str, messages: &[String]) {
    if messages.is_empty() {
        return;
    }
    println!("{header} ({})", messages.len());
    for msg in messages {
        println!("  - {msg}");
    }
    println!();
}

// ── Helpers ──

fn truncate(name: &str) -> String {
    if name.chars().count() > MAX_NAME_WIDTH {
        let short: String = name.chars().take(MAX_NAME_WIDTH - 3).collect();
        format!("{short}...")
    } else {
        name.to_string()
    }
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
