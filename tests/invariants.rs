//! Property checks over generated rosters: quota exactness, conflict
//! freedom, class exclusivity, block contiguity and determinism.

use std::collections::{BTreeMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use u_timetable::models::{
    ClassSection, Day, PeriodsPerShift, ScheduleEntry, SchedulingRequest, Shift, Slot, Teacher,
    TeachingAssignment, Timetable,
};
use u_timetable::scheduler::{
    block_lengths, normalize, verify_entries, SchedulerConfig, TimetableKpi, TimetableScheduler,
};
use u_timetable::{build_schedule, SchedulingError};

const TEACHERS: [&str; 3] = ["T1", "T2", "T3"];
const LESSONS: [&str; 5] = ["MAT", "FIZ", "KIM", "TAR", "BED"];

fn random_request(seed: u64) -> SchedulingRequest {
    let mut rng = StdRng::seed_from_u64(seed);
    let periods = PeriodsPerShift::new(rng.random_range(4..=8), rng.random_range(4..=8));

    let teachers = TEACHERS
        .iter()
        .map(|&id| {
            let blocked: Vec<Slot> = (0..rng.random_range(0..=3))
                .map(|_| Slot::new(Day::ALL[rng.random_range(0..5)], rng.random_range(1..=4)))
                .collect();
            Teacher::new(id).with_name(id).with_blocked_slots(blocked)
        })
        .collect();

    let classes = (0..rng.random_range(1..=4))
        .map(|c| {
            let shift = if rng.random_bool(0.5) {
                Shift::Morning
            } else {
                Shift::Afternoon
            };
            let lesson_count = rng.random_range(1..=LESSONS.len());
            LESSONS[..lesson_count]
                .iter()
                .fold(ClassSection::new(format!("C{c}"), shift), |class, &lesson| {
                    let hours = rng.random_range(0..=4);
                    let assignment = TeachingAssignment::new(lesson, hours);
                    let assignment = if rng.random_bool(0.8) {
                        let t = TEACHERS[rng.random_range(0..TEACHERS.len())];
                        assignment.with_teacher(t, t)
                    } else {
                        assignment
                    };
                    class.with_assignment(assignment)
                })
        })
        .collect();

    SchedulingRequest::new(classes, teachers).with_periods(periods)
}

fn assert_invariants(request: &SchedulingRequest, entries: &[ScheduleEntry]) {
    // Teacher conflict freedom.
    let mut teacher_cells = HashSet::new();
    for e in entries {
        if let Some(t) = &e.teacher_id {
            assert!(
                teacher_cells.insert((t.clone(), e.day, e.period)),
                "teacher {t} double-booked at {}/{}",
                e.day,
                e.period
            );
        }
    }

    // Class exclusivity and shift range.
    let mut class_cells = HashSet::new();
    for e in entries {
        assert!(class_cells.insert((e.class_id.clone(), e.day, e.period)));
        let class = request.class(&e.class_id).unwrap();
        assert!(e.period >= 1 && e.period <= request.periods_per_shift.periods(class.shift));
        assert_eq!(e.shift, class.shift);
    }

    // Blocked slots respected.
    for e in entries {
        if let Some(t) = &e.teacher_id {
            assert!(request
                .teacher(t)
                .unwrap()
                .is_available(Slot::new(e.day, e.period)));
        }
    }

    // Quota exactness and block contiguity.
    for class in &request.classes {
        for a in class.assignments.iter().filter(|a| a.weekly_hours > 0) {
            let mut by_day: BTreeMap<Day, Vec<u8>> = BTreeMap::new();
            for e in entries
                .iter()
                .filter(|e| e.class_id == class.id && e.lesson_id == a.lesson_id)
            {
                by_day.entry(e.day).or_default().push(e.period);
            }
            let count: usize = by_day.values().map(Vec::len).sum();
            assert_eq!(count as u32, a.weekly_hours, "{}/{}", class.id, a.lesson_id);

            let mut pairs = 0;
            for periods in by_day.values_mut() {
                periods.sort_unstable();
                let mut i = 0;
                while i + 1 < periods.len() {
                    if periods[i + 1] == periods[i] + 1 {
                        pairs += 1;
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
            }
            let needed = block_lengths(a.weekly_hours)
                .iter()
                .filter(|&&l| l == 2)
                .count();
            assert!(pairs >= needed, "{}/{} lacks blocks", class.id, a.lesson_id);
        }
    }
}

#[test]
fn test_random_rosters_hold_invariants() {
    let mut successes = 0;
    for seed in 0..200 {
        let request = random_request(seed);
        match build_schedule(&request) {
            Ok(entries) => {
                successes += 1;
                assert_invariants(&request, &entries);
                let normalized = normalize(&request).unwrap();
                assert!(verify_entries(&normalized, &entries).is_ok());
            }
            Err(SchedulingError::EmptyRoster) | Err(SchedulingError::UnplaceableChunk { .. }) => {}
            Err(other) => panic!("seed {seed}: unexpected error {other}"),
        }
    }
    assert!(successes > 0);
}

#[test]
fn test_random_rosters_with_spreading() {
    let scheduler = TimetableScheduler::new().with_spread_lesson_days(true);
    for seed in 0..100 {
        let request = random_request(seed);
        if let Ok(timetable) = scheduler.schedule(&request) {
            assert_invariants(&request, &timetable.entries);
        }
    }
}

#[test]
fn test_deterministic_output() {
    for seed in 0..20 {
        let request = random_request(seed);
        let first = build_schedule(&request);
        let second = build_schedule(&request);
        match (first, second) {
            (Ok(a), Ok(b)) => assert_eq!(
                serde_json::to_string(&a).unwrap(),
                serde_json::to_string(&b).unwrap()
            ),
            (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
            _ => panic!("seed {seed}: runs disagree"),
        }
    }
}

#[test]
fn test_types_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TimetableScheduler>();
    assert_send_sync::<SchedulerConfig>();
    assert_send_sync::<SchedulingRequest>();
    assert_send_sync::<Timetable>();
    assert_send_sync::<SchedulingError>();
}

#[test]
fn test_concurrent_runs_agree() {
    let scheduler = TimetableScheduler::new();
    let requests: Vec<SchedulingRequest> = (0..8).map(random_request).collect();
    let expected: Vec<_> = requests
        .iter()
        .map(|r| scheduler.schedule(r).map_err(|e| e.to_string()))
        .collect();

    let shared = &scheduler;
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = requests
            .iter()
            .map(|r| scope.spawn(move || shared.schedule(r).map_err(|e| e.to_string())))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, expected);
}

#[test]
fn test_kpi_on_generated_timetable() {
    let request = random_request(7);
    if let Ok(timetable) = TimetableScheduler::new().schedule(&request) {
        let normalized = normalize(&request).unwrap();
        let kpi = TimetableKpi::calculate(&timetable, &normalized);
        assert_eq!(kpi.total_hours as usize, timetable.entry_count());
        let teacher_total: u32 = kpi.teacher_hours.values().sum();
        let staffed = timetable.entries.iter().filter(|e| e.teacher_id.is_some()).count();
        assert_eq!(teacher_total as usize, staffed);
        assert!(kpi.avg_fill_rate > 0.0 && kpi.avg_fill_rate <= 1.0);
    }
}
