use std::time::Duration;

use parallel_jobs::prelude::*;
use tracing_subscriber::EnvFilter;

fn request(job: &Job) -> Result<(), JobError> {
    std::thread::sleep(Duration::from_millis(50));
    let name = job.get_payload("name")?;
    println!("{}. job completed. Job payload name: {}", job.id, name);
    Ok(())
}

fn main() -> Result<(), OrchestratorError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Orchestrator being tested....
    println!("Orchestrator Samples");
    let mut orchestrator = Orchestrator::new(OrchestratorConfig::new(5), request)?;
    for id in 0..10 {
        orchestrator.enqueue(Job::new(id).with_value("name", format!("HTTP Request #{}", id)));
    }
    // one job without a payload to show a recorded failure
    orchestrator.enqueue(Job::new(10));

    let tm = std::time::Instant::now();
    let results = orchestrator.start(&Context::background());
    for result in &results {
        match &result.error {
            Some(err) => println!("Worker {} failed job {} with error: {}", result.worker_id, result.job_id, err),
            None => println!("Worker {} finished job {}", result.worker_id, result.job_id),
        }
    }
    println!("Time elapsed: {} milliseconds.", tm.elapsed().as_millis());

    // For each being tested....
    println!("For Each test");
    let data = (0..20).collect::<Vec<u64>>();
    data.parallel_for_each(|n| {
        std::thread::sleep(Duration::from_millis(100));
        println!("Processed input: {} -> result: {}", n, n * n);
    });
    println!("All data processed!");

    Ok(())
}
