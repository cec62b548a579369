//! Schedule fixtures
//!
//! Small hand-written schedules plus generated ones of a given size.

use schedule_graph::ScheduleDescriptor;

/// `A`: one system, no hierarchy entry
pub fn fixture_schedule_a() -> ScheduleDescriptor {
    ScheduleDescriptor::new("A").with_system("sys1", "game::systems::sys1")
}

/// `B`: `set1` containing `sys2`, plus `set1 → sys2` ordering
pub fn fixture_schedule_b() -> ScheduleDescriptor {
    ScheduleDescriptor::new("B")
        .with_system("sys2", "game::systems::sys2")
        .with_set("set1", "game::sets::Set1")
        .with_hierarchy("set1", ["sys2"], Vec::<String>::new())
        .with_hierarchy("sys2", Vec::<String>::new(), ["set1"])
        .with_dependency("set1", "sys2")
}

/// Bevy-shaped `Update` schedule: two nested sets, three systems, a chain
pub fn fixture_update_schedule() -> ScheduleDescriptor {
    ScheduleDescriptor::new("Update")
        .with_system("System(0)", "game::input::read_keys")
        .with_system("System(1)", "game::physics::integrate")
        .with_system("System(2)", "game::render::draw")
        .with_set("Set(3)", "game::GameplaySet")
        .with_set("Set(4)", "game::PhysicsSet")
        .with_hierarchy("Set(3)", ["System(0)", "Set(4)"], Vec::<String>::new())
        .with_hierarchy("Set(4)", ["System(1)"], ["Set(3)"])
        .with_hierarchy("System(0)", Vec::<String>::new(), ["Set(3)"])
        .with_hierarchy("System(1)", Vec::<String>::new(), ["Set(4)"])
        .with_dependency("System(0)", "System(1)")
        .with_dependency("System(1)", "System(2)")
}

/// `set_count` sets, each holding `systems_per_set` systems chained in order
pub fn fixture_wide_schedule(name: &str, set_count: usize, systems_per_set: usize) -> ScheduleDescriptor {
    let mut desc = ScheduleDescriptor::new(name);
    let mut next_id = 0usize;
    for s in 0..set_count {
        let set_id = format!("Set({next_id})");
        next_id += 1;
        let mut members = Vec::with_capacity(systems_per_set);
        for i in 0..systems_per_set {
            let sys_id = format!("System({next_id})");
            next_id += 1;
            desc = desc
                .with_system(sys_id.clone(), format!("game::set_{s}::system_{i}"))
                .with_hierarchy(sys_id.clone(), Vec::<String>::new(), [set_id.clone()]);
            if let Some(prev) = members.last() {
                desc = desc.with_dependency(String::clone(prev), sys_id.clone());
            }
            members.push(sys_id);
        }
        desc = desc
            .with_set(set_id.clone(), format!("game::Set{s}"))
            .with_hierarchy(set_id, members, Vec::<String>::new());
    }
    desc
}
