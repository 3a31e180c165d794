// src/store/catalog.rs
//
// Practice sets, vacancies, advertisements and the drug index. Plain
// form-over-data tables; the only behavior is the approval gate on
// vacancies and the date window on ads.

use chrono::Utc;

use crate::error::AppError;
use crate::models::ad::{Advertisement, CreateAdRequest};
use crate::models::drug::{CreateDrugRequest, Drug};
use crate::models::material::ApprovalStatus;
use crate::models::practice::PracticeSet;
use crate::models::question::QuestionInput;
use crate::models::quiz::Program;
use crate::models::user::Role;
use crate::models::vacancy::{CreateVacancyRequest, Vacancy};

use super::{MemoryStore, READ, SLOW_WRITE, WRITE, fresh_id};

pub struct NewPracticeSet {
    pub title: String,
    pub topic: String,
    pub program: Program,
    pub created_by: String,
}

impl MemoryStore {
    // --- Practice sets ---

    pub async fn list_practice_sets(&self, program: Option<Program>) -> Vec<PracticeSet> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;
        match program {
            Some(filter) => tables
                .practice_sets
                .iter()
                .filter(|s| s.program.visible_to(filter))
                .cloned()
                .collect(),
            None => tables.practice_sets.clone(),
        }
    }

    pub async fn create_practice_set(
        &self,
        new: NewPracticeSet,
        questions: Vec<QuestionInput>,
    ) -> Result<PracticeSet, AppError> {
        if questions.is_empty() {
            return Err(AppError::Validation(
                "A practice set needs at least one question".to_string(),
            ));
        }

        self.simulate_latency(SLOW_WRITE).await;
        let set_id = fresh_id();
        let set = PracticeSet {
            id: set_id.clone(),
            title: new.title,
            topic: new.topic,
            program: new.program,
            created_by: new.created_by,
            questions: questions
                .into_iter()
                .enumerate()
                .map(|(i, q)| q.into_question(&set_id, i))
                .collect(),
        };
        let mut tables = self.tables.write().await;
        tables.practice_sets.push(set.clone());
        Ok(set)
    }

    // --- Vacancies ---

    /// Admins see every posting; everyone else only approved ones.
    pub async fn list_vacancies(&self, role: Role) -> Vec<Vacancy> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;
        if role == Role::Admin {
            return tables.vacancies.clone();
        }
        tables
            .vacancies
            .iter()
            .filter(|v| v.status == ApprovalStatus::Approved)
            .cloned()
            .collect()
    }

    pub async fn vacancies_for(&self, user_id: &str) -> Vec<Vacancy> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;
        tables
            .vacancies
            .iter()
            .filter(|v| v.posted_by == user_id)
            .cloned()
            .collect()
    }

    pub async fn create_vacancy(
        &self,
        req: CreateVacancyRequest,
        posted_by: &str,
        poster_name: &str,
        poster_role: Role,
    ) -> Result<Vacancy, AppError> {
        self.simulate_latency(WRITE).await;
        let vacancy = Vacancy {
            id: fresh_id(),
            title: req.title,
            company: req.company,
            location: req.location,
            employment_type: req.employment_type,
            salary: req.salary,
            deadline: req.deadline,
            description: req.description,
            requirements: req.requirements,
            contact_email: req.contact_email,
            image_url: req.image_url,
            posted_by: posted_by.to_string(),
            poster_name: poster_name.to_string(),
            poster_role,
            status: ApprovalStatus::Pending,
            posted_at: Utc::now(),
        };
        let mut tables = self.tables.write().await;
        tables.vacancies.push(vacancy.clone());
        Ok(vacancy)
    }

    pub async fn set_vacancy_status(
        &self,
        id: &str,
        status: ApprovalStatus,
    ) -> Result<Vacancy, AppError> {
        self.simulate_latency(WRITE).await;
        let mut tables = self.tables.write().await;
        let vacancy = tables
            .vacancies
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::NotFound("Vacancy not found".to_string()))?;
        vacancy.status = status;
        let vacancy = vacancy.clone();

        if status != ApprovalStatus::Pending {
            let verdict = if status == ApprovalStatus::Approved { "approved" } else { "rejected" };
            tables.notify(
                &vacancy.posted_by,
                "Vacancy reviewed",
                format!("Your vacancy '{}' was {}.", vacancy.title, verdict),
            );
        }
        Ok(vacancy)
    }

    // --- Advertisements ---

    pub async fn active_ads(&self) -> Vec<Advertisement> {
        self.simulate_latency(READ).await;
        let today = Utc::now().date_naive();
        let tables = self.tables.read().await;
        tables
            .ads
            .iter()
            .filter(|ad| ad.is_active_on(today))
            .cloned()
            .collect()
    }

    pub async fn list_ads(&self) -> Vec<Advertisement> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;
        tables.ads.clone()
    }

    pub async fn create_ad(&self, req: CreateAdRequest) -> Result<Advertisement, AppError> {
        if req.end_date < req.start_date {
            return Err(AppError::Validation(
                "Ad end date must not precede its start date".to_string(),
            ));
        }
        self.simulate_latency(WRITE).await;
        let ad = Advertisement {
            id: fresh_id(),
            title: req.title,
            image_url: req.image_url,
            start_date: req.start_date,
            end_date: req.end_date,
            link_url: req.link_url,
        };
        let mut tables = self.tables.write().await;
        tables.ads.push(ad.clone());
        Ok(ad)
    }

    pub async fn delete_ad(&self, id: &str) -> Result<(), AppError> {
        self.simulate_latency(WRITE).await;
        let mut tables = self.tables.write().await;
        let before = tables.ads.len();
        tables.ads.retain(|a| a.id != id);
        if tables.ads.len() == before {
            return Err(AppError::NotFound("Advertisement not found".to_string()));
        }
        Ok(())
    }

    // --- Drug index ---

    /// Case-insensitive match over brand name, generic name and category.
    /// An empty query returns the full index.
    pub async fn search_drugs(&self, query: Option<&str>) -> Vec<Drug> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;
        match query.map(|q| q.trim().to_lowercase()).filter(|q| !q.is_empty()) {
            Some(q) => tables
                .drugs
                .iter()
                .filter(|d| {
                    d.brand_name.to_lowercase().contains(&q)
                        || d.generic_name.to_lowercase().contains(&q)
                        || d.category.to_lowercase().contains(&q)
                })
                .cloned()
                .collect(),
            None => tables.drugs.clone(),
        }
    }

    pub async fn create_drug(&self, req: CreateDrugRequest) -> Result<Drug, AppError> {
        self.simulate_latency(WRITE).await;
        let drug = Drug {
            id: fresh_id(),
            brand_name: req.brand_name,
            generic_name: req.generic_name,
            category: req.category,
            description: req.description,
            dosage: req.dosage,
            side_effects: req.side_effects,
            manufacturer: req.manufacturer,
            image_url: req.image_url,
        };
        let mut tables = self.tables.write().await;
        tables.drugs.push(drug.clone());
        Ok(drug)
    }

    pub async fn delete_drug(&self, id: &str) -> Result<(), AppError> {
        self.simulate_latency(WRITE).await;
        let mut tables = self.tables.write().await;
        let before = tables.drugs.len();
        tables.drugs.retain(|d| d.id != id);
        if tables.drugs.len() == before {
            return Err(AppError::NotFound("Drug not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn drug_search_matches_brand_generic_and_category() {
        let store = MemoryStore::new(Duration::ZERO);
        store
            .create_drug(CreateDrugRequest {
                brand_name: "Cetamol".to_string(),
                generic_name: "Paracetamol".to_string(),
                category: "Analgesic".to_string(),
                description: "Used for fever and mild pain.".to_string(),
                dosage: "500mg".to_string(),
                side_effects: "Liver toxicity in high doses".to_string(),
                manufacturer: "Nepal Pharma".to_string(),
                image_url: None,
            })
            .await
            .unwrap();

        assert_eq!(store.search_drugs(Some("ceta")).await.len(), 1);
        assert_eq!(store.search_drugs(Some("PARACETAMOL")).await.len(), 1);
        assert_eq!(store.search_drugs(Some("analgesic")).await.len(), 1);
        assert_eq!(store.search_drugs(Some("insulin")).await.len(), 0);
        assert_eq!(store.search_drugs(None).await.len(), 1);
    }

    #[tokio::test]
    async fn only_admins_see_pending_vacancies() {
        let store = MemoryStore::new(Duration::ZERO);
        let vacancy = store
            .create_vacancy(
                CreateVacancyRequest {
                    title: "Hospital Pharmacist".to_string(),
                    company: "City Hospital".to_string(),
                    location: "Kathmandu".to_string(),
                    employment_type: "Full-time".to_string(),
                    salary: "Negotiable".to_string(),
                    deadline: chrono::NaiveDate::from_ymd_opt(2027, 1, 31).unwrap(),
                    description: "Dispensary duty.".to_string(),
                    requirements: "Licensed pharmacist.".to_string(),
                    contact_email: "hr@cityhospital.example.com".to_string(),
                    image_url: None,
                },
                "i1",
                "Dr. Sharma",
                Role::Instructor,
            )
            .await
            .unwrap();

        assert!(store.list_vacancies(Role::Student).await.is_empty());
        assert_eq!(store.list_vacancies(Role::Admin).await.len(), 1);

        store
            .set_vacancy_status(&vacancy.id, ApprovalStatus::Approved)
            .await
            .unwrap();
        assert_eq!(store.list_vacancies(Role::Student).await.len(), 1);
        assert_eq!(store.notifications_for("i1").await.len(), 1);
    }

    #[tokio::test]
    async fn ad_window_is_inclusive() {
        let store = MemoryStore::new(Duration::ZERO);
        let today = Utc::now().date_naive();
        store
            .create_ad(CreateAdRequest {
                title: "Big Discount on Books".to_string(),
                image_url: "https://cdn.example.com/books.png".to_string(),
                start_date: today,
                end_date: today,
                link_url: None,
            })
            .await
            .unwrap();
        store
            .create_ad(CreateAdRequest {
                title: "Expired".to_string(),
                image_url: "https://cdn.example.com/old.png".to_string(),
                start_date: today - chrono::Days::new(10),
                end_date: today - chrono::Days::new(5),
                link_url: None,
            })
            .await
            .unwrap();

        let active = store.active_ads().await;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "Big Discount on Books");
        assert_eq!(store.list_ads().await.len(), 2);
    }
}
