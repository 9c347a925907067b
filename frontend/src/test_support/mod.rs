#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{InfectedFlag, Patient, User, Wound};

    pub fn sample_user() -> User {
        User {
            id: "u1".into(),
            name: "nurse".into(),
            email: "nurse@example.com".into(),
            role: "nurse".into(),
        }
    }

    pub fn sample_patient(id: &str) -> Patient {
        Patient {
            id: id.into(),
            supervisor: "u1".into(),
            name: "Jane Roe".into(),
            avatar: String::new(),
            gender: "Female".into(),
            age: 54,
            bed: 12,
            department: "Surgery".into(),
            blood_type: "A+".into(),
            wound: Wound {
                wound_type: "Burn".into(),
                location: "Arm".into(),
                severity: "Mild".into(),
                infected: InfectedFlag::Label("No".into()),
                size: 2.5,
                treatment: "Moist Wound Dressing".into(),
            },
            created_at: "2025-01-02 10:00:00+00:00".into(),
            updated_at: "2025-01-02 10:00:00+00:00".into(),
            indicators: Vec::new(),
        }
    }
}
