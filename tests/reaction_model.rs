use approx::assert_abs_diff_eq;
use more_asserts::{assert_ge, assert_le};
use virtual_lab_rust::{
    Color, PhysicalState, ReactionPhase, calculate_stoichiometry, compute_reaction_color, compute_reaction_state,
    compute_runtime_state, get_explosion_params, registry, simulate_process, suggest_reactions,
};

#[test]
fn color_endpoints_and_linear_blend_for_every_simulation() {
    let reg = registry();
    for sim_type in reg.simulation_types() {
        let colors = reg.profile(sim_type).unwrap().colors;
        assert_eq!(compute_reaction_color(sim_type, 25.0, 7.0, 0.0), colors.before, "{sim_type}");
        assert_eq!(compute_reaction_color(sim_type, 25.0, 7.0, 1.0), colors.after, "{sim_type}");

        let mid = compute_reaction_color(sim_type, 25.0, 7.0, 0.5);
        let expected = |a: u8, b: u8| ((a as f64 + b as f64) / 2.0).round() as u8;
        assert_eq!(mid.r, expected(colors.before.r, colors.after.r));
        assert_eq!(mid.g, expected(colors.before.g, colors.after.g));
        assert_eq!(mid.b, expected(colors.before.b, colors.after.b));
    }
}

#[test]
fn completes_after_nominal_window() {
    let reg = registry();
    for sim_type in reg.simulation_types() {
        let window = reg.profile(sim_type).unwrap().window;
        let temperature = (window.min_temp + window.max_temp) / 2.0;
        let ph = (window.min_ph + window.max_ph) / 2.0;
        for elapsed in [5000.0, 7500.0, 120_000.0] {
            let state = compute_reaction_state(sim_type, temperature, ph, elapsed);
            assert_eq!(state.progress, 1.0, "{sim_type} at {elapsed} ms");
            assert_eq!(state.state, ReactionPhase::Complete, "{sim_type} at {elapsed} ms");
        }
        let halfway = compute_reaction_state(sim_type, temperature, ph, 2500.0);
        assert_abs_diff_eq!(halfway.progress, 0.5);
    }
}

#[test]
fn non_finite_elapsed_time_is_idle() {
    for elapsed in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let state = compute_reaction_state("acid-base", 25.0, 7.0, elapsed);
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.state, ReactionPhase::Idle);
    }
}

#[test]
fn carbon_dioxide_stays_gaseous_when_cold() {
    let co2 = registry().compound("co2").unwrap();
    assert_eq!(co2.state_at(-100.0), PhysicalState::Gas);
    assert_eq!(co2.state_at(25.0), PhysicalState::Gas);
}

#[test]
fn out_of_window_is_always_idle() {
    let window = registry().profile("acid-base").unwrap().window;
    let cases = [
        (window.min_temp - 0.5, 7.0),
        (window.max_temp + 0.5, 7.0),
        (25.0, window.min_ph - 0.5),
        (25.0, window.max_ph + 0.5),
        (-40.0, 20.0),
    ];
    for (temperature, ph) in cases {
        for elapsed in [0.0, 1.0, 2500.0, 5000.0, 1e9] {
            let state = compute_reaction_state("acid-base", temperature, ph, elapsed);
            assert_eq!(state.progress, 0.0);
            assert!(!state.boiling);
            assert_eq!(state.state, ReactionPhase::Idle);
        }
    }
}

#[test]
fn explosiveness_above_threshold_can_explode() {
    let reg = registry();

    // explosiveness 0.8, no explicit flag
    let thermite = reg.reaction("thermite").unwrap();
    assert_eq!(thermite.can_explode, None);
    assert!(get_explosion_params(thermite).can_explode);

    // explosiveness 0.5, no flag
    let combustion = reg.reaction("methane-combustion").unwrap();
    assert!(!get_explosion_params(combustion).can_explode);

    // explosiveness 0.6 but flagged explicitly
    let pop = reg.reaction("hydrogen-oxygen").unwrap();
    let params = get_explosion_params(pop);
    assert!(params.can_explode);
    assert_eq!(params.radius, 4.0);

    // nothing set: every number defined
    let neutral = get_explosion_params(reg.reaction("hcl-naoh").unwrap());
    assert!(!neutral.can_explode);
    assert_eq!(neutral.intensity, 0.0);
    assert_eq!(neutral.radius, 2.0);
}

#[test]
fn stoichiometry_scales_by_first_reactant() {
    let reg = registry();
    let neutralization = reg.reaction("hcl-naoh").unwrap();
    let result = calculate_stoichiometry(neutralization, 2.0);
    assert!(result.reactants.iter().all(|r| r.moles_used == 2.0));
    assert!(result.products.iter().all(|p| p.moles_produced == 2.0));

    let zinc = reg.reaction("zinc-hcl").unwrap();
    let result = calculate_stoichiometry(zinc, 0.5);
    assert_abs_diff_eq!(result.reactants[1].moles_used, 1.0);
    assert_abs_diff_eq!(result.products[1].moles_produced, 0.5);
}

#[test]
fn acid_base_halfway() {
    let state = compute_reaction_state("acid-base", 25.0, 7.0, 2500.0);
    assert_abs_diff_eq!(state.progress, 0.5);
    assert_eq!(state.state, ReactionPhase::Reacting);
    assert!(!state.boiling);

    let color = compute_reaction_color("acid-base", 25.0, 7.0, state.progress);
    let expected = Color::from_hex("#ff4444").unwrap().blend(Color::from_hex("#f5f5f5").unwrap(), 0.5);
    assert_eq!(color, expected);
    assert_eq!(color.to_hex(), "#fa9d9d");
}

#[test]
fn acid_base_overheated_stays_idle() {
    for elapsed in [0.0, 2500.0, 10_000.0] {
        let state = compute_reaction_state("acid-base", 150.0, 7.0, elapsed);
        assert_eq!(state.state, ReactionPhase::Idle);
        assert_eq!(state.progress, 0.0);
    }
}

#[test]
fn empty_selection_suggests_nothing() {
    assert!(suggest_reactions(&[]).is_empty());
}

#[test]
fn suggestions_are_loose_matches() {
    let ids: Vec<&str> = suggest_reactions(&["hcl", "zn"]).into_iter().map(|r| r.id.as_str()).collect();
    assert!(ids.contains(&"hcl-naoh"));
    assert!(ids.contains(&"zinc-hcl"));
    // needs only one reactant and it is not selected
    assert!(!ids.contains(&"limestone-decomposition"));

    let by_formula = suggest_reactions(&["CaCO3"]);
    assert_eq!(by_formula.len(), 1);
    assert_eq!(by_formula[0].id, "limestone-decomposition");
}

#[test]
fn progress_is_monotonic_while_in_range() {
    let mut last = 0.0;
    for tick in 0..=20 {
        let state = compute_reaction_state("acid-base", 40.0, 3.0, tick as f64 * 300.0);
        assert_ge!(state.progress, last);
        assert_le!(state.progress, 1.0);
        last = state.progress;
    }
}

#[test]
fn runtime_state_reports_effects() {
    let runtime = compute_runtime_state("thermite", 1500.0, 7.0, 2500.0);
    assert_eq!(runtime.state, ReactionPhase::Reacting);
    assert_abs_diff_eq!(runtime.effects.flame, 0.5);
    assert_abs_diff_eq!(runtime.effects.explosion_likelihood, 0.4, epsilon = 1e-12);

    let boiling = compute_runtime_state("water-boiling", 100.0, 7.0, 2500.0);
    assert!(boiling.boiling);
    // 0.45 * 0.5, doubled while boiling
    assert_abs_diff_eq!(boiling.effects.evaporation, 0.45, epsilon = 1e-12);
    assert_eq!(boiling.effects.heat_release, 0.0);
}

#[test]
fn biology_processes_share_the_timing_model() {
    let reg = registry();
    let growth = reg.process("bacterial-growth").unwrap();

    let early = simulate_process(growth, 37.0, 7.0, 2_000.0);
    let late = simulate_process(growth, 37.0, 7.0, 20_000.0);
    assert_eq!(late.state, ReactionPhase::Complete);
    assert_abs_diff_eq!(late.output("population").unwrap(), 1_000_000.0, epsilon = 1e-6);
    assert!(early.output("population").unwrap() < late.output("population").unwrap());

    let state = compute_reaction_state("bacterial-growth", 37.0, 7.0, 2_000.0);
    assert_eq!(state.progress, early.progress);

    let cold = simulate_process(growth, 2.0, 7.0, 20_000.0);
    assert_eq!(cold.state, ReactionPhase::Idle);
    assert_eq!(cold.output("population"), Some(1000.0));
}

#[test]
fn limestone_needs_heat_to_decompose() {
    let limestone = registry().reaction("limestone-decomposition").unwrap();
    // 178.3 - 298.15 * 0.1606
    virtual_lab_rust::assert_deviation!(limestone.delta_g(25.0), 130.42, 0.1);
    assert!(!limestone.is_spontaneous(25.0));
    assert!(limestone.is_spontaneous(900.0));
}
