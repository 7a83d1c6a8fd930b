//! Database seeder for Scholaris development and testing.
//!
//! Seeds an admin account, an academic year, a class with a teacher,
//! subjects, a few students, and a tuition fee schedule for local
//! development.
//!
//! Usage: cargo run --bin seeder

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use scholaris_core::auth::hash_password;
use scholaris_db::entities::{
    academic_years, classes, fee_structures, staff, students, subjects, users,
    sea_orm_active_enums::{FeeType, StaffDesignation, UserRole},
};

/// Admin user ID (consistent for all seeds)
const ADMIN_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Academic year ID (consistent for all seeds)
const ACADEMIC_YEAR_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Class ID (consistent for all seeds)
const CLASS_ID: &str = "00000000-0000-0000-0000-000000000003";
/// Teacher staff ID (consistent for all seeds)
const TEACHER_STAFF_ID: &str = "00000000-0000-0000-0000-000000000004";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = scholaris_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding admin user...");
    seed_admin(&db).await;

    println!("Seeding academic year...");
    seed_academic_year(&db).await;

    println!("Seeding subjects...");
    seed_subjects(&db).await;

    println!("Seeding teacher and class...");
    seed_teacher_and_class(&db).await;

    println!("Seeding students...");
    seed_students(&db).await;

    println!("Seeding fee structure...");
    seed_fee_structure(&db).await;

    println!("Seeding complete!");
}

fn admin_user_id() -> Uuid {
    Uuid::parse_str(ADMIN_USER_ID).unwrap()
}

fn academic_year_id() -> Uuid {
    Uuid::parse_str(ACADEMIC_YEAR_ID).unwrap()
}

fn class_id() -> Uuid {
    Uuid::parse_str(CLASS_ID).unwrap()
}

fn teacher_staff_id() -> Uuid {
    Uuid::parse_str(TEACHER_STAFF_ID).unwrap()
}

fn now() -> sea_orm::prelude::DateTimeWithTimeZone {
    chrono::Utc::now().into()
}

/// Seeds the admin account for development.
async fn seed_admin(db: &DatabaseConnection) {
    if users::Entity::find_by_id(admin_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Admin user already exists, skipping...");
        return;
    }

    let password_hash = hash_password("admin123").expect("Failed to hash seed password");

    let user = users::ActiveModel {
        id: Set(admin_user_id()),
        username: Set("admin".to_string()),
        email: Set("admin@scholaris.dev".to_string()),
        password_hash: Set(password_hash),
        first_name: Set("System".to_string()),
        last_name: Set("Admin".to_string()),
        role: Set(UserRole::Admin),
        phone_number: Set(None),
        date_of_birth: Set(None),
        address: Set(None),
        is_active: Set(true),
        created_at: Set(now()),
        updated_at: Set(now()),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert admin user: {e}");
    } else {
        println!("  Created admin user: admin / admin123");
    }
}

/// Seeds the current academic year.
async fn seed_academic_year(db: &DatabaseConnection) {
    if academic_years::Entity::find_by_id(academic_year_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Academic year already exists, skipping...");
        return;
    }

    let year = academic_years::ActiveModel {
        id: Set(academic_year_id()),
        name: Set("2025-2026".to_string()),
        start_date: Set(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()),
        end_date: Set(NaiveDate::from_ymd_opt(2026, 7, 31).unwrap()),
        is_active: Set(true),
        created_at: Set(now()),
        updated_at: Set(now()),
    };

    if let Err(e) = year.insert(db).await {
        eprintln!("Failed to insert academic year: {e}");
    } else {
        println!("  Created academic year 2025-2026");
    }
}

/// Seeds a handful of core subjects.
async fn seed_subjects(db: &DatabaseConnection) {
    let seed = [
        ("Mathematics", "MATH"),
        ("English Language", "ENG"),
        ("Basic Science", "SCI"),
        ("Social Studies", "SOC"),
    ];

    for (name, code) in seed {
        let exists = subjects::Entity::find()
            .filter(subjects::Column::Code.eq(code))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some();

        if exists {
            println!("  Subject {code} already exists, skipping...");
            continue;
        }

        let subject = subjects::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            code: Set(code.to_string()),
            description: Set(None),
            created_at: Set(now()),
            updated_at: Set(now()),
        };

        if let Err(e) = subject.insert(db).await {
            eprintln!("Failed to insert subject {code}: {e}");
        } else {
            println!("  Created subject {name} ({code})");
        }
    }
}

/// Seeds one teacher and a Grade 10 A class they teach.
async fn seed_teacher_and_class(db: &DatabaseConnection) {
    if staff::Entity::find_by_id(teacher_staff_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Teacher already exists, skipping...");
        return;
    }

    let password_hash = hash_password("teacher123").expect("Failed to hash seed password");
    let teacher_user_id = Uuid::new_v4();

    let user = users::ActiveModel {
        id: Set(teacher_user_id),
        username: Set("ajohnson".to_string()),
        email: Set("a.johnson@scholaris.dev".to_string()),
        password_hash: Set(password_hash),
        first_name: Set("Ada".to_string()),
        last_name: Set("Johnson".to_string()),
        role: Set(UserRole::Staff),
        phone_number: Set(None),
        date_of_birth: Set(None),
        address: Set(None),
        is_active: Set(true),
        created_at: Set(now()),
        updated_at: Set(now()),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert teacher user: {e}");
        return;
    }

    let teacher = staff::ActiveModel {
        id: Set(teacher_staff_id()),
        user_id: Set(teacher_user_id),
        staff_code: Set("STF-001".to_string()),
        designation: Set(StaffDesignation::Teacher),
        joining_date: Set(NaiveDate::from_ymd_opt(2020, 9, 1).unwrap()),
        qualification: Set(Some("B.Ed Mathematics".to_string())),
        experience_years: Set(5),
        created_at: Set(now()),
        updated_at: Set(now()),
    };

    if let Err(e) = teacher.insert(db).await {
        eprintln!("Failed to insert teacher profile: {e}");
        return;
    }

    let class = classes::ActiveModel {
        id: Set(class_id()),
        name: Set("Grade 10 A".to_string()),
        grade: Set(10),
        section: Set("A".to_string()),
        academic_year_id: Set(academic_year_id()),
        class_teacher_id: Set(Some(teacher_staff_id())),
        created_at: Set(now()),
        updated_at: Set(now()),
    };

    if let Err(e) = class.insert(db).await {
        eprintln!("Failed to insert class: {e}");
    } else {
        println!("  Created teacher STF-001 and class Grade 10 A");
    }
}

/// Seeds three students enrolled in the seeded class.
async fn seed_students(db: &DatabaseConnection) {
    let seed = [
        ("STU-001", "bade", "Bisi", "Ade"),
        ("STU-002", "cokafor", "Chinedu", "Okafor"),
        ("STU-003", "dlawal", "Dami", "Lawal"),
    ];

    for (code, username, first, last) in seed {
        let exists = students::Entity::find()
            .filter(students::Column::StudentCode.eq(code))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some();

        if exists {
            println!("  Student {code} already exists, skipping...");
            continue;
        }

        let password_hash = hash_password("student123").expect("Failed to hash seed password");
        let user_id = Uuid::new_v4();

        let user = users::ActiveModel {
            id: Set(user_id),
            username: Set(username.to_string()),
            email: Set(format!("{username}@scholaris.dev")),
            password_hash: Set(password_hash),
            first_name: Set(first.to_string()),
            last_name: Set(last.to_string()),
            role: Set(UserRole::Student),
            phone_number: Set(None),
            date_of_birth: Set(None),
            address: Set(None),
            is_active: Set(true),
            created_at: Set(now()),
            updated_at: Set(now()),
        };

        if let Err(e) = user.insert(db).await {
            eprintln!("Failed to insert student user {code}: {e}");
            continue;
        }

        let student = students::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            student_code: Set(code.to_string()),
            admission_date: Set(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()),
            current_class_id: Set(Some(class_id())),
            emergency_contact_name: Set(None),
            emergency_contact_phone: Set(None),
            medical_info: Set(None),
            created_at: Set(now()),
            updated_at: Set(now()),
        };

        if let Err(e) = student.insert(db).await {
            eprintln!("Failed to insert student profile {code}: {e}");
        } else {
            println!("  Created student {code} ({first} {last})");
        }
    }
}

/// Seeds the Grade 10 tuition fee for the seeded year.
async fn seed_fee_structure(db: &DatabaseConnection) {
    let exists = fee_structures::Entity::find()
        .filter(fee_structures::Column::AcademicYearId.eq(academic_year_id()))
        .filter(fee_structures::Column::Grade.eq(10))
        .filter(fee_structures::Column::FeeType.eq(FeeType::Tuition))
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some();

    if exists {
        println!("  Fee structure already exists, skipping...");
        return;
    }

    let structure = fee_structures::ActiveModel {
        id: Set(Uuid::new_v4()),
        academic_year_id: Set(academic_year_id()),
        grade: Set(10),
        fee_type: Set(FeeType::Tuition),
        amount: Set(Decimal::new(30000, 2)), // 300.00 per term
        description: Set(Some("Grade 10 tuition".to_string())),
        created_at: Set(now()),
        updated_at: Set(now()),
    };

    if let Err(e) = structure.insert(db).await {
        eprintln!("Failed to insert fee structure: {e}");
    } else {
        println!("  Created Grade 10 tuition fee structure");
    }
}
