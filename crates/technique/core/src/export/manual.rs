use core::fmt::Write;

use strum::IntoEnumIterator;

use super::signed;
use crate::catalog::{Catalog, Effect, EffectOption, Force, PowerLevel};

/// Suggested download name for [`markdown_manual`].
pub const MANUAL_FILE_NAME: &str = "manual_papa_rpg.md";

/// Reference manual: levels table, forces and the catalog by category.
pub fn markdown_manual(catalog: &Catalog) -> String {
    let mut md = String::new();
    // Writing to a String cannot fail.
    let _ = write_manual(&mut md, catalog);
    md
}

fn write_manual(md: &mut String, catalog: &Catalog) -> core::fmt::Result {
    writeln!(md, "# Manual de Creación de Técnicas RPG - Sistema P.A.P.A\n")?;

    writeln!(md, "## 1. Niveles de Poder\n")?;
    writeln!(md, "| Nivel | Resistencia | PC Disponibles |")?;
    writeln!(md, "| :--- | :---: | :---: |")?;
    for level in PowerLevel::iter() {
        writeln!(
            md,
            "| {level} | {} | {} |",
            level.resistance_cost(),
            level.pc_budget()
        )?;
    }

    writeln!(md, "\n## 2. Fuerzas Dominantes\n")?;
    for force in Force::iter() {
        writeln!(md, "* **{force}:** {}", force.description())?;
    }

    writeln!(md, "\n## 3. Catálogo de Efectos\n")?;
    for category in catalog.categories() {
        writeln!(md, "### {category}")?;
        for effect in catalog.effects_in(category) {
            write_effect(md, effect)?;
        }
    }
    Ok(())
}

fn write_effect(md: &mut String, effect: &Effect) -> core::fmt::Result {
    writeln!(md, "#### {}\n{}", effect.name, effect.description)?;

    if !effect.restrictions.is_empty() {
        let forbidden: Vec<String> = effect.restrictions.forces().map(|f| f.to_string()).collect();
        writeln!(md, "* **Fuerzas Prohibidas:** {}", forbidden.join(", "))?;
    }

    if !effect.options.is_empty() {
        writeln!(md, "* **Opciones:**")?;
        for option in &effect.options {
            match option {
                EffectOption::Select { name, values, .. } => {
                    let values: Vec<String> = values
                        .iter()
                        .map(|value| format!("{} ({} PC)", value.name, signed(value.cost)))
                        .collect();
                    writeln!(md, "  - {name}: {}", values.join(", "))?;
                }
                EffectOption::Toggle { name, cost, .. } => {
                    writeln!(md, "  - {name} ({} PC)", signed(*cost))?;
                }
            }
        }
    }
    writeln!(md)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;

    #[test]
    fn manual_lists_levels_and_forces() {
        let md = markdown_manual(&fixtures::catalog());
        assert!(md.starts_with("# Manual de Creación de Técnicas RPG"));
        assert!(md.contains("| Apoyo | 1 | 5 |\n"));
        assert!(md.contains("| Nivel 3 | 6 | 25 |\n"));
        assert!(md.contains("* **Caos:** "));
    }

    #[test]
    fn manual_renders_effects_in_category_order() {
        let md = markdown_manual(&fixtures::catalog());
        let offensive = md.find("### Efectos ofensivos").unwrap();
        let disadvantages = md.find("### Desventajas").unwrap();
        assert!(offensive < disadvantages);

        assert!(md.contains("* **Fuerzas Prohibidas:** Conservación, Creación, Orden\n"));
        assert!(md.contains("  - Bonificación: +1 (+2 PC), +2 (+4 PC), +3 (+8 PC)\n"));
        assert!(md.contains("  - Tipo de daño diferente (+3 PC) (+3 PC)\n"));
        assert!(md.contains("  - Duración del Agotamiento: 1 ronda (-4 PC)"));
    }
}
