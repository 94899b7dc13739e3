use planet_rain_model::*;

const RELEASE_ALTITUDE: f64 = 600.0; // m
const INITIAL_RADII_MM: [f64; 5] = [0.01, 0.05, 0.1, 0.5, 1.0];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let planets = match std::env::args().nth(1) {
        Some(path) => vec![PlanetParameters::from_path(path)?],
        None => PlanetFactory::all(),
    };

    for (label, config) in [
        ("power-law fall speed", DescentConfig::default()),
        (
            "physical fall speed",
            DescentConfig::default().with_terminal_velocity(TerminalVelocityModel::Physical),
        ),
    ] {
        println!("--- Raindrop descent, {} ---", label);

        for planet in &planets {
            let simulator = DescentSimulator::new(planet.clone(), config)?;

            for radius_mm in INITIAL_RADII_MM {
                let initial_radius = radius_mm * 1e-3;
                match simulator.run(initial_radius, RELEASE_ALTITUDE) {
                    Ok(trajectory) => {
                        let report = DescentReport::from_trajectory(
                            &planet.name,
                            initial_radius,
                            RELEASE_ALTITUDE,
                            &trajectory,
                        );
                        println!("{}", report);
                    }
                    Err(e) => {
                        log::warn!("{}: r0 = {} mm failed: {}", planet.name, radius_mm, e);
                    }
                }
            }
        }
        println!();
    }

    Ok(())
}
