use colored::Colorize;
use virtual_lab_rust::{
    ThermalClass, calculate_stoichiometry, get_explosion_params, registry, simulate_process,
};

fn main() {
    tracing_subscriber::fmt().with_target(false).init();
    let reg = registry();

    println!("{}", "=== Reactions ===".bold());
    for reaction in reg.reactions() {
        let thermal = match reaction.thermal_class() {
            ThermalClass::Exothermic => "exothermic".red(),
            ThermalClass::Endothermic => "endothermic".blue(),
            ThermalClass::Thermoneutral => "thermoneutral".normal(),
        };
        let explosion = get_explosion_params(reaction);
        let stoich = calculate_stoichiometry(reaction, 2.0);

        println!(
            "{:<45} {:<28} ΔH {:>8.1} kJ/mol  {}  ΔG(25 °C) {:>8.1}",
            reaction.name.bold(),
            reaction.equation,
            reaction.delta_h,
            thermal,
            reaction.delta_g(25.0)
        );
        if explosion.can_explode {
            println!(
                "    {} intensity {:.2}, radius {:.1}",
                "explosive".on_red(),
                explosion.intensity,
                explosion.radius
            );
        }
        println!("    2 mol limiting reagent -> {:.2} g of product", stoich.product_mass_g(reaction));
    }

    println!("{}", "=== Biology at optimum ===".bold());
    for process in reg.processes() {
        let state = simulate_process(process, process.optimal_temp, process.optimal_ph, process.profile.duration_ms / 2.0);
        let outputs: Vec<String> = state
            .outputs
            .iter()
            .map(|o| format!("{} {:.2} {}", o.name, o.value, o.unit))
            .collect();
        println!("{:<24} {:>5.1}%  {}", process.name.green(), state.progress * 100.0, outputs.join(", "));
    }

    println!("{}", "=== Suggestions for HCl + Zn ===".bold());
    for reaction in reg.suggest_reactions(&["HCl", "Zn"]) {
        println!("  {}", reaction.equation);
    }
}
