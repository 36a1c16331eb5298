use super::{ExportError, signed};
use crate::pricing::BudgetReport;
use crate::technique::{EffectInstance, SelectedEffectOption, Technique};

/// Plain-text summary of a technique, ready for the clipboard.
pub fn text_summary(technique: &Technique, report: &BudgetReport) -> Result<String, ExportError> {
    let level = technique.level.ok_or(ExportError::LevelNotSelected)?;

    let name = non_empty(&technique.name).unwrap_or("Sin Nombre");
    let force = technique
        .force
        .map(|force| force.to_string())
        .unwrap_or_else(|| "Ninguna".to_owned());
    let description = non_empty(&technique.description).unwrap_or("Sin descripción.");
    let overage = if report.is_over_budget() {
        " (¡Presupuesto excedido!)"
    } else {
        ""
    };

    let effects = if technique.effects.is_empty() {
        "Ningún efecto añadido.".to_owned()
    } else {
        technique
            .effects
            .iter()
            .map(effect_line)
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(format!(
        "--- TÉCNICA: {name} ---\n\
         \n\
         Nivel: {level}\n\
         Fuerza: {force}\n\
         Coste de Resistencia: {resistance}\n\
         \n\
         PC Gastados: {spent} / {budget}{overage}\n\
         \n\
         Descripción:\n\
         {description}\n\
         \n\
         --- EFECTOS ---\n\
         {effects}",
        resistance = technique.resistance_cost,
        spent = report.spent(),
        budget = report.budget_or_zero(),
    ))
}

fn effect_line(instance: &EffectInstance) -> String {
    let details: Vec<&str> = instance
        .selected_options
        .iter()
        .map(option_detail)
        .filter(|detail| !detail.is_empty())
        .collect();

    let options = if details.is_empty() {
        String::new()
    } else {
        format!(" ({})", details.join(", "))
    };
    format!(
        "- {}{}: {} PC",
        instance.effect.name,
        options,
        signed(instance.final_cost)
    )
}

/// Active toggles show their name without the parenthesised cost hint.
fn option_detail(option: &SelectedEffectOption) -> &str {
    if option.is_toggle() {
        option
            .name
            .split(" (")
            .next()
            .unwrap_or(option.name.as_str())
    } else {
        option.value.as_str()
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Force, PowerLevel, fixtures};
    use crate::pricing::CostBreakdown;
    use crate::technique::InstanceId;

    fn report_for(technique: &Technique) -> BudgetReport {
        BudgetReport {
            breakdown: CostBreakdown::from_instances(&technique.effects, 12),
            budget: technique.pc_budget(),
        }
    }

    #[test]
    fn requires_level() {
        let technique = Technique::named("Golpe");
        assert_eq!(
            text_summary(&technique, &report_for(&technique)),
            Err(ExportError::LevelNotSelected)
        );
    }

    #[test]
    fn empty_technique_uses_placeholders() {
        let technique = Technique {
            level: Some(PowerLevel::Support),
            resistance_cost: 1,
            ..Technique::default()
        };
        let text = text_summary(&technique, &report_for(&technique)).unwrap();
        let expected = "--- TÉCNICA: Sin Nombre ---\n\
                        \n\
                        Nivel: Apoyo\n\
                        Fuerza: Ninguna\n\
                        Coste de Resistencia: 1\n\
                        \n\
                        PC Gastados: 0 / 5\n\
                        \n\
                        Descripción:\n\
                        Sin descripción.\n\
                        \n\
                        --- EFECTOS ---\n\
                        Ningún efecto añadido.";
        assert_eq!(text, expected);
    }

    #[test]
    fn effect_lines_and_overage() {
        let mut technique = Technique {
            name: "Tajo".into(),
            level: Some(PowerLevel::Support),
            force: Some(Force::Destruction),
            resistance_cost: 1,
            ..Technique::default()
        };
        technique.effects = vec![
            EffectInstance::new(
                InstanceId(1),
                fixtures::damage_bonus(),
                vec![
                    SelectedEffectOption::new("bonus_select", "Bonificación", "+2", 4),
                    SelectedEffectOption::new(
                        "different_damage_type",
                        "Tipo de daño diferente (+3 PC)",
                        SelectedEffectOption::ACTIVE,
                        3,
                    ),
                ],
            ),
            EffectInstance::new(
                InstanceId(2),
                fixtures::exhaustion(),
                vec![SelectedEffectOption::new("exh_val", "Duración", "1 ronda", -4)],
            ),
        ];

        let text = text_summary(&technique, &report_for(&technique)).unwrap();
        assert!(text.contains("Fuerza: Destrucción\n"));
        assert!(text.contains("PC Gastados: 3 / 5\n"));
        assert!(text.ends_with(
            "- Bono al daño (+2, Tipo de daño diferente): +7 PC\n\
             - Agotamiento (1 ronda): -4 PC"
        ));

        technique.effects.pop();
        let text = text_summary(&technique, &report_for(&technique)).unwrap();
        assert!(text.contains("PC Gastados: 7 / 5 (¡Presupuesto excedido!)\n"));
    }
}
