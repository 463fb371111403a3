//! Property tests for the filter pipeline and the query-string mapping.

use doctor_directory::directory::extract::{numeric_experience, numeric_fees};
use doctor_directory::directory::query::{
    from_query, from_query_string, to_query, to_query_string,
};
use doctor_directory::directory::{
    apply, ConsultationMode, Doctor, FilterState, SortKey, Specialty, SpecialtySelection,
};
use proptest::prelude::*;
use proptest::test_runner::Config;

const SPECIALTY_POOL: [&str; 5] = [
    "Dentist",
    "ENT",
    "Cardiologist",
    "General Physician",
    "Dietitian/Nutritionist",
];

fn mode() -> impl Strategy<Value = ConsultationMode> {
    prop_oneof![
        Just(ConsultationMode::Any),
        Just(ConsultationMode::VideoConsult),
        Just(ConsultationMode::InClinic),
    ]
}

fn sort() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Original),
        Just(SortKey::FeesAscending),
        Just(SortKey::ExperienceDescending),
    ]
}

/// Any state a user can reach, including names the selection refuses.
fn reachable_state() -> impl Strategy<Value = FilterState> {
    (
        any::<String>(),
        mode(),
        prop::collection::vec(any::<String>(), 0..6),
        sort(),
    )
        .prop_map(|(search, mode, names, sort)| {
            let mut specialties = SpecialtySelection::new();
            for name in &names {
                specialties.toggle(name);
            }
            FilterState {
                search,
                mode,
                specialties,
                sort,
            }
        })
}

/// States drawn from a small vocabulary so that filters actually match.
fn narrow_state() -> impl Strategy<Value = FilterState> {
    (
        prop_oneof![Just(String::new()), "[a-zA-Z. ]{1,3}"],
        mode(),
        prop::sample::subsequence(SPECIALTY_POOL.to_vec(), 0..=2),
        sort(),
    )
        .prop_map(|(search, mode, names, sort)| FilterState {
            search,
            mode,
            specialties: names.into_iter().collect(),
            sort,
        })
}

fn fees() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..3000).prop_map(|n| format!("₹ {}", n)),
        (0u32..3).prop_map(|n| format!("₹ {},000", n)),
        Just(String::new()),
        "[a-z ]{0,6}",
    ]
}

fn experience() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..40).prop_map(|n| format!("{} Years of experience", n)),
        Just(String::new()),
        "[a-z ]{0,6}",
    ]
}

fn doctors() -> impl Strategy<Value = Vec<Doctor>> {
    prop::collection::vec(
        (
            "Dr\\. [A-Z][a-z]{1,6}",
            fees(),
            experience(),
            any::<bool>(),
            any::<bool>(),
            prop::sample::subsequence(SPECIALTY_POOL.to_vec(), 0..=3),
        ),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, fees, experience, video, clinic, specialties))| {
                let mut doctor = Doctor::new(i.to_string(), name);
                doctor.fees = fees;
                doctor.experience = experience;
                doctor.video_consult = video;
                doctor.in_clinic = clinic;
                doctor.specialties = specialties.into_iter().map(Specialty::new).collect();
                doctor
            })
            .collect()
    })
}

fn position(doctor: &Doctor) -> usize {
    doctor.id.parse().unwrap()
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn query_string_round_trips(state in reachable_state()) {
        let encoded = to_query_string(&state);
        let decoded = from_query_string(&encoded);
        prop_assert_eq!(&decoded, &state);
        prop_assert_eq!(to_query_string(&decoded), encoded);
        prop_assert_eq!(from_query(to_query(&state)), state);
    }

    #[test]
    fn apply_is_idempotent(doctors in doctors(), state in narrow_state()) {
        let once = apply(&doctors, &state);
        prop_assert_eq!(apply(&once, &state), once);
    }

    #[test]
    fn apply_keeps_exactly_the_admitted_doctors(doctors in doctors(), state in narrow_state()) {
        let result = apply(&doctors, &state);
        let needle = state.search.to_lowercase();
        let admitted = |d: &Doctor| {
            d.name.to_lowercase().contains(&needle)
                && state.mode.admits(d)
                && state.specialties.admits(d)
        };

        prop_assert!(result.iter().all(|d| admitted(d)));
        prop_assert_eq!(result.len(), doctors.iter().filter(|d| admitted(*d)).count());
    }

    #[test]
    fn sorting_is_stable(doctors in doctors(), state in narrow_state()) {
        let result = apply(&doctors, &state);
        for pair in result.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let tie = match state.sort {
                SortKey::Original => true,
                SortKey::FeesAscending => {
                    prop_assert!(numeric_fees(&a.fees) <= numeric_fees(&b.fees));
                    numeric_fees(&a.fees) == numeric_fees(&b.fees)
                }
                SortKey::ExperienceDescending => {
                    prop_assert!(numeric_experience(&a.experience) >= numeric_experience(&b.experience));
                    numeric_experience(&a.experience) == numeric_experience(&b.experience)
                }
            };
            if tie {
                prop_assert!(position(a) < position(b));
            }
        }
    }
}
