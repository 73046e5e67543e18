use colored::Colorize;
use virtual_lab_rust::{
    LabConfig, LabResult, LabSession, ProgressReportingOp, ReactionPhase, ReadingLoggerOp, SessionOp,
};

fn main() -> LabResult<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = LabConfig { tick_interval_ms: 250.0, ..LabConfig::default() };
    let ops: Vec<Box<dyn SessionOp>> = vec![
        Box::new(ReadingLoggerOp::new()),
        Box::new(ProgressReportingOp::with_frequency(25.0)),
    ];
    let mut session = LabSession::new("acid-base", config, ops)?;

    println!("{}", "=== Acid-base neutralization ===".bold());
    let ticks = session.run_until_complete(100);
    println!("completed in {} ticks ({} ms)", ticks, session.elapsed_ms);

    if let Some(logger) = session.op::<ReadingLoggerOp>() {
        for reading in &logger.readings {
            let state = match reading.state {
                ReactionPhase::Idle => "idle".dimmed(),
                ReactionPhase::Reacting => "reacting".yellow(),
                ReactionPhase::Complete => "complete".green(),
            };
            println!(
                "{:>6.0} ms | {:>5.1} °C | pH {:>4.1} | {:>5.1}% | {} | {}",
                reading.elapsed_ms,
                reading.temperature,
                reading.ph,
                reading.progress * 100.0,
                reading.color,
                state
            );
        }
    }

    println!("{}", "=== Overheating mid-reaction ===".bold());
    session.restart_reaction();
    for _ in 0..8 {
        session.step();
    }
    session.set_parameter("temperature", 150.0)?;
    session.step();
    if let Some(state) = &session.current {
        println!(
            "at {} °C: progress {:.1}% ({})",
            session.temperature(),
            state.progress * 100.0,
            state.state.as_str().red()
        );
    }

    for timing in &session.op_timings {
        println!(
            "  {:<22} avg update {:?} over {} calls",
            timing.op_name,
            timing.avg_update_time(),
            timing.update_call_count
        );
    }

    Ok(())
}
