// src/store/seed.rs
//
// Demo catalog loaded by the server binary so a fresh process is usable
// immediately. Accounts: student@pharma.com / instructor@pharma.com /
// admin@pharma.com, all with password "password".

use chrono::Utc;

use crate::models::drug::Drug;
use crate::models::practice::PracticeSet;
use crate::models::question::Question;
use crate::models::quiz::{Program, Quiz, QuizStatus};
use crate::models::user::{Role, User};
use crate::utils::hash::hash_password;

use super::{Tables, fresh_id};

fn demo_user(name: &str, email: &str, role: Role, program: Option<Program>) -> User {
    User {
        id: fresh_id(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash: hash_password("password").expect("hashing demo password"),
        role,
        program,
        is_verified: true,
        created_at: Utc::now(),
    }
}

fn question(
    quiz_id: &str,
    index: usize,
    text: &str,
    options: [&str; 4],
    correct: usize,
    explanation: &str,
) -> Question {
    Question {
        id: format!("{quiz_id}_q{index}"),
        text: text.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        correct_answer: correct,
        explanation: Some(explanation.to_string()),
    }
}

pub(super) fn demo_tables() -> Tables {
    let mut tables = Tables::default();

    tables.users = vec![
        demo_user("Aarav Student", "student@pharma.com", Role::Student, Some(Program::Bachelor)),
        demo_user("Dr. Sharma", "instructor@pharma.com", Role::Instructor, None),
        demo_user("System Admin", "admin@pharma.com", Role::Admin, None),
    ];

    let midterm_id = fresh_id();
    let midterm_questions = vec![
        question(
            &midterm_id,
            0,
            "Which of the following is a beta-blocker?",
            ["Atenolol", "Lisinopril", "Amlodipine", "Furosemide"],
            0,
            "Atenolol is a selective beta-1 blocker used to treat hypertension.",
        ),
        question(
            &midterm_id,
            1,
            "What is the standard dosage unit for Insulin?",
            ["mg", "ml", "Units", "grams"],
            2,
            "Insulin is dosed in International Units.",
        ),
    ];
    tables.quizzes.push(Quiz {
        id: midterm_id.clone(),
        title: "Mid-Term Pharmacology".to_string(),
        duration_minutes: 45,
        program: Program::Bachelor,
        status: QuizStatus::Published,
        question_count: midterm_questions.len(),
    });
    tables.questions.insert(midterm_id, midterm_questions);

    let practice_id = fresh_id();
    tables.practice_sets.push(PracticeSet {
        id: practice_id.clone(),
        title: "Cardiovascular Drugs".to_string(),
        topic: "Pharmacology".to_string(),
        program: Program::Bachelor,
        created_by: tables.users[1].id.clone(),
        questions: vec![
            question(
                &practice_id,
                0,
                "Digoxin is primarily used for?",
                ["Hypertension", "Heart Failure", "Diabetes", "Asthma"],
                1,
                "Digoxin increases myocardial contractility.",
            ),
            question(
                &practice_id,
                1,
                "Which drug causes a dry cough as a side effect?",
                ["Lisinopril", "Losartan", "Metoprolol", "Verapamil"],
                0,
                "ACE inhibitors like Lisinopril often cause dry cough.",
            ),
        ],
    });

    tables.drugs.push(Drug {
        id: fresh_id(),
        brand_name: "Cetamol".to_string(),
        generic_name: "Paracetamol".to_string(),
        category: "Analgesic".to_string(),
        description: "Used for fever and mild pain.".to_string(),
        dosage: "500mg".to_string(),
        side_effects: "Liver toxicity in high doses".to_string(),
        manufacturer: "Nepal Pharma".to_string(),
        image_url: None,
    });

    tables
}
