use std::f64::consts::TAU;

use anyhow::Result;
use clap::ValueEnum;
use crowd_steering::util::angle::{new_orientation, orientation_to_vector};
use crowd_steering::util::vector::normalize_or_zero;
use crowd_steering::{
    AgentLimits, Align, CollisionAvoidance, DynamicArrive, DynamicFlee, DynamicSeek,
    DynamicWander, Evade, Face, Kinematic, KinematicArrive, KinematicFlee, KinematicWander,
    LookWhereYouAreGoing, Obstacle, ObstacleAvoidance, Path, PathFollowing, Point, Pursue,
    Separation, Static, SteeringOutput, VelocityMatching,
};
use rand::Rng;

use crate::world::World;

/// Outputs below this are treated as "nothing to do" when prioritizing.
const PRIORITY_EPSILON: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    KinematicArrive,
    KinematicFlee,
    KinematicWander,
    Seek,
    Flee,
    Arrive,
    Align,
    VelocityMatching,
    Face,
    PursueEvade,
    Wander,
    Path,
    Separation,
    CollisionAvoidance,
    ObstacleAvoidance,
}

impl Scenario {
    fn uses_target(&self) -> bool {
        matches!(
            self,
            Scenario::KinematicArrive
                | Scenario::KinematicFlee
                | Scenario::Seek
                | Scenario::Flee
                | Scenario::Arrive
                | Scenario::Align
                | Scenario::VelocityMatching
                | Scenario::Face
        )
    }
}

/// A target that circles the middle of the world, standing in for a pointer
/// the agents chase.
struct Orbit {
    center: Point,
    radius: f64,
    angular_speed: f64,
    elapsed: f64,
    state: Kinematic,
}

impl Orbit {
    fn new(agent_id: usize, world: &World) -> Self {
        let center = world.center();
        let radius = world.width.min(world.height) / 3.0;
        let mut orbit = Self {
            center,
            radius,
            angular_speed: 0.5,
            elapsed: 0.0,
            state: Kinematic::new(agent_id, center, 0.0),
        };
        orbit.advance(0.0);
        orbit
    }

    fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
        let phase = self.elapsed * self.angular_speed;
        self.state.position = self.center + Point::new(phase.cos(), phase.sin()) * self.radius;
        self.state.velocity =
            Point::new(-phase.sin(), phase.cos()) * self.radius * self.angular_speed;
        self.state.orientation = new_orientation(self.state.orientation, &self.state.velocity);
    }
}

/// Every behaviour a scenario may combine, configured from the agent limits.
struct Behaviours {
    kinematic_arrive: KinematicArrive,
    kinematic_flee: KinematicFlee,
    kinematic_wander: KinematicWander,
    seek: DynamicSeek,
    flee: DynamicFlee,
    arrive: DynamicArrive,
    align: Align,
    face: Face,
    look: LookWhereYouAreGoing,
    velocity_matching: VelocityMatching,
    pursue: Pursue,
    evade: Evade,
    separation: Separation,
    collision_avoidance: CollisionAvoidance,
    obstacle_avoidance: ObstacleAvoidance,
}

impl Behaviours {
    fn new(limits: &AgentLimits) -> Result<Self> {
        let align = Align::with_limits(limits.max_rotation, limits.max_angular_acceleration)?;
        Ok(Self {
            kinematic_arrive: KinematicArrive::new(limits.max_speed, 5.0, 0.25)?,
            kinematic_flee: KinematicFlee::new(limits.max_speed / 2.0)?,
            kinematic_wander: KinematicWander::new(limits.max_speed / 4.0, limits.max_rotation)?,
            seek: DynamicSeek::new(limits.max_acceleration)?,
            flee: DynamicFlee::new(limits.max_acceleration)?,
            arrive: DynamicArrive::new(limits.max_acceleration, limits.max_speed, 5.0, 100.0, 0.1)?,
            align,
            face: Face::new(align),
            look: LookWhereYouAreGoing::new(align),
            velocity_matching: VelocityMatching::new(limits.max_acceleration, 0.1)?,
            pursue: Pursue::new(limits.max_acceleration, 2.0)?,
            evade: Evade::new(limits.max_acceleration, 2.0)?,
            separation: Separation::new(20.0, 1000.0, limits.max_acceleration)?,
            collision_avoidance: CollisionAvoidance::new(limits.max_acceleration, 20.0)?,
            obstacle_avoidance: ObstacleAvoidance::new(50.0, limits.max_acceleration)?,
        })
    }

    fn wander(&self, limits: &AgentLimits) -> Result<DynamicWander> {
        Ok(DynamicWander::new(self.face, 50.0, 20.0, 0.3, limits.max_acceleration)?)
    }
}

/// State of one scenario run
pub struct Run {
    scenario: Scenario,
    limits: AgentLimits,
    behaviours: Behaviours,
    agents: Vec<Kinematic>,
    target: Option<Orbit>,
    wanderers: Vec<DynamicWander>,
    followers: Vec<PathFollowing>,
    path: Option<Path>,
    obstacles: Vec<Obstacle>,
}

pub fn build<R: Rng>(
    scenario: Scenario,
    world: &World,
    num_agents: usize,
    rng: &mut R,
) -> Result<Run> {
    let limits = AgentLimits::default();
    let behaviours = Behaviours::new(&limits)?;

    let num_agents = match scenario {
        Scenario::PursueEvade => 2,
        Scenario::KinematicArrive
        | Scenario::KinematicFlee
        | Scenario::Seek
        | Scenario::Flee
        | Scenario::Arrive
        | Scenario::Align
        | Scenario::VelocityMatching
        | Scenario::Face => 1,
        _ => num_agents,
    };

    let mut agents: Vec<Kinematic> = (0..num_agents)
        .map(|agent_id| {
            let orientation = rng.gen_range(-TAU / 2.0..TAU / 2.0);
            Kinematic::new(agent_id, world.random_point(rng), orientation).with_limits(limits)
        })
        .collect();

    let mut obstacles = Vec::new();
    let mut path = None;
    let mut wanderers = Vec::new();
    let mut followers = Vec::new();

    match scenario {
        Scenario::Align | Scenario::Face => {
            for agent in agents.iter_mut() {
                agent.position = world.center();
            }
        }
        Scenario::Wander | Scenario::CollisionAvoidance => {
            for _ in 0..agents.len() {
                wanderers.push(behaviours.wander(&limits)?);
            }
        }
        Scenario::Separation => {
            // Agent 0 wanders; the rest shadow it.
            if let Some(player) = agents.first_mut() {
                player.position = world.center();
                wanderers.push(behaviours.wander(&limits)?);
            }
        }
        Scenario::Path => {
            let center = world.center();
            let radius = world.width.min(world.height) / 3.0;
            let circuit = Path::circle(center, radius, 12)?;
            log::info!(
                "Following {} waypoints, {:.1} units per lap",
                circuit.len(),
                lap_length(&circuit)
            );
            path = Some(circuit);
            for _ in 0..agents.len() {
                followers.push(PathFollowing::new(30.0, limits.max_acceleration)?);
            }
        }
        Scenario::ObstacleAvoidance => {
            for _ in 0..5 {
                let position = Point::new(
                    rng.gen_range(100.0..(world.width - 100.0).max(100.1)),
                    rng.gen_range(100.0..(world.height - 100.0).max(100.1)),
                );
                obstacles.push(Obstacle::new(position, 30.0));
            }
            for agent in agents.iter_mut() {
                while obstacles.iter().any(|obstacle| obstacle.contains(&agent.position)) {
                    agent.position = world.random_point(rng);
                }
                agent.velocity = orientation_to_vector(agent.orientation) * 100.0;
            }
        }
        _ => {}
    }

    let target = scenario
        .uses_target()
        .then(|| Orbit::new(agents.len(), world));

    Ok(Run {
        scenario,
        limits,
        behaviours,
        agents,
        target,
        wanderers,
        followers,
        path,
        obstacles,
    })
}

fn lap_length(path: &Path) -> f64 {
    path.segments().map(|(from, to)| (to - from).norm()).sum()
}

impl Run {
    pub fn step<R: Rng>(&mut self, world: &World, dt: f64, rng: &mut R) -> Result<()> {
        if let Some(target) = self.target.as_mut() {
            target.advance(dt);
        }
        let target = self.target.as_ref().map(|orbit| orbit.state);
        let goal = target.as_ref().map(Static::from);
        let b = &self.behaviours;

        match self.scenario {
            Scenario::KinematicArrive | Scenario::KinematicFlee => {
                let goal = goal.unwrap_or_else(|| Static::at(world.center()));
                for agent in self.agents.iter_mut() {
                    let steering = if self.scenario == Scenario::KinematicArrive {
                        b.kinematic_arrive.get_steering(agent, &goal)
                    } else {
                        b.kinematic_flee.get_steering(agent, &goal)
                    };
                    agent.update_kinematic(&steering, dt)?;
                    world.wrap(agent);
                }
            }
            Scenario::KinematicWander => {
                for agent in self.agents.iter_mut() {
                    let steering = b.kinematic_wander.get_steering(agent, rng);
                    agent.update_kinematic(&steering, dt)?;
                    world.wrap(agent);
                }
            }
            Scenario::Seek | Scenario::Flee | Scenario::Arrive => {
                let goal = goal.unwrap_or_else(|| Static::at(world.center()));
                for agent in self.agents.iter_mut() {
                    let linear = match self.scenario {
                        Scenario::Seek => b.seek.get_steering(agent, &goal),
                        Scenario::Flee => b.flee.get_steering(agent, &goal),
                        _ => b.arrive.get_steering(agent, &goal),
                    };
                    let steering = linear.with_angular_from(&b.look.get_steering(agent));
                    agent.update(&steering, dt)?;
                    world.clamp(agent);
                }
            }
            Scenario::Align | Scenario::Face | Scenario::VelocityMatching => {
                let Some(target) = target else {
                    return Ok(());
                };
                for agent in self.agents.iter_mut() {
                    let steering = match self.scenario {
                        Scenario::Align => b.align.get_steering(agent, &Static::from(&target)),
                        Scenario::Face => b.face.get_steering_to(agent, &Static::from(&target)),
                        _ => b
                            .velocity_matching
                            .get_steering(agent, &target)
                            .with_angular_from(&b.look.get_steering(agent)),
                    };
                    agent.update(&steering, dt)?;
                    world.clamp(agent);
                }
            }
            Scenario::PursueEvade => {
                let snapshot = self.agents.clone();
                if let [pursuer, evader] = snapshot.as_slice() {
                    let chase = b.pursue.get_steering(pursuer, evader);
                    let escape = b.evade.get_steering(evader, pursuer);
                    let steering = [
                        chase.with_angular_from(&b.look.get_steering(pursuer)),
                        escape.with_angular_from(&b.look.get_steering(evader)),
                    ];
                    for (agent, steering) in self.agents.iter_mut().zip(steering.iter()) {
                        agent.update(steering, dt)?;
                        world.wrap(agent);
                    }
                }
            }
            Scenario::Wander => {
                for (agent, wander) in self.agents.iter_mut().zip(self.wanderers.iter_mut()) {
                    let steering = wander.get_steering(agent, rng);
                    agent.update(&steering, dt)?;
                    world.wrap(agent);
                }
            }
            Scenario::Path => {
                let Some(path) = self.path.as_ref() else {
                    return Ok(());
                };
                for (agent, follower) in self.agents.iter_mut().zip(self.followers.iter_mut()) {
                    let steering = follower
                        .get_steering(agent, path)
                        .with_angular_from(&b.look.get_steering(agent));
                    agent.update(&steering, dt)?;
                    world.clamp(agent);
                }
            }
            Scenario::Separation => {
                let snapshot = self.agents.clone();
                let Some((player, others)) = self.agents.split_first_mut() else {
                    return Ok(());
                };
                if let Some(wander) = self.wanderers.first_mut() {
                    let steering = wander.get_steering(player, rng);
                    player.update(&steering, dt)?;
                    world.wrap(player);
                }
                let Some(leader) = snapshot.first() else {
                    return Ok(());
                };
                for agent in others.iter_mut() {
                    let steering = SteeringOutput::blend(
                        &[
                            (b.velocity_matching.get_steering(agent, leader), 1.0),
                            (b.separation.get_steering(agent, &snapshot), 1.0),
                        ],
                        self.limits.max_acceleration,
                        self.limits.max_angular_acceleration,
                    )
                    .with_angular(0.0);
                    agent.update(&steering, dt)?;
                    world.wrap(agent);
                }
            }
            Scenario::CollisionAvoidance => {
                let snapshot = self.agents.clone();
                for (agent, wander) in self.agents.iter_mut().zip(self.wanderers.iter_mut()) {
                    let wandering = wander.get_steering(agent, rng);
                    let steering = SteeringOutput::blend(
                        &[
                            (wandering, 1.0),
                            (b.collision_avoidance.get_steering(agent, &snapshot), 1.0),
                        ],
                        self.limits.max_acceleration,
                        self.limits.max_angular_acceleration,
                    )
                    .with_angular_from(&wandering);
                    agent.update(&steering, dt)?;
                    world.wrap(agent);
                }
            }
            Scenario::ObstacleAvoidance => {
                for agent in self.agents.iter_mut() {
                    let forward = SteeringOutput::linear(
                        normalize_or_zero(&agent.velocity) * self.limits.max_acceleration,
                    );
                    let steering = SteeringOutput::prioritized(
                        &[b.obstacle_avoidance.get_steering(agent, &self.obstacles), forward],
                        PRIORITY_EPSILON,
                    );
                    agent.update(&steering, dt)?;
                    world.bounce(agent);
                }
            }
        }
        Ok(())
    }

    pub fn report(&self, tick: usize) {
        if let Some(target) = self.target.as_ref() {
            log::info!(
                "[{}] target at ({:.1}, {:.1})",
                tick,
                target.state.position.x,
                target.state.position.y
            );
        }
        for agent in self.agents.iter() {
            log::info!(
                "[{}] agent {} at ({:.1}, {:.1}) speed {:.1} orientation {:.2}",
                tick,
                agent.agent_id,
                agent.position.x,
                agent.position.y,
                agent.speed(),
                agent.orientation
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn run_for(scenario: Scenario, ticks: usize) -> Run {
        let world = World::new(800.0, 600.0).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        let mut run = build(scenario, &world, 6, &mut rng).unwrap();
        for _ in 0..ticks {
            run.step(&world, 1.0 / 60.0, &mut rng).unwrap();
        }
        run
    }

    #[test]
    fn test_every_scenario_stays_in_world() {
        for scenario in Scenario::value_variants() {
            let run = run_for(*scenario, 300);
            for agent in run.agents.iter() {
                assert!(agent.position.x >= 0.0 && agent.position.x <= 800.0, "{scenario:?}");
                assert!(agent.position.y >= 0.0 && agent.position.y <= 600.0, "{scenario:?}");
                assert!(agent.speed() <= agent.max_speed + 1e-9, "{scenario:?}");
            }
        }
    }

    #[test]
    fn test_agent_counts() {
        let world = World::new(800.0, 600.0).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(build(Scenario::PursueEvade, &world, 9, &mut rng).unwrap().agents.len(), 2);
        assert_eq!(build(Scenario::Seek, &world, 9, &mut rng).unwrap().agents.len(), 1);
        assert_eq!(build(Scenario::Wander, &world, 9, &mut rng).unwrap().agents.len(), 9);
    }

    #[test]
    fn test_lap_length_of_square() {
        let square = Path::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
        .unwrap();
        assert_eq!(lap_length(&square), 40.0);
        assert_eq!(lap_length(&Path::new(vec![Point::new(3.0, 3.0)]).unwrap()), 0.0);
    }

    #[test]
    fn test_obstacle_scenario_starts_clear() {
        let run = run_for(Scenario::ObstacleAvoidance, 0);
        for agent in run.agents.iter() {
            assert!(run.obstacles.iter().all(|obstacle| !obstacle.contains(&agent.position)));
        }
    }
}
