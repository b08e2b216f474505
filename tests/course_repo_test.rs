use bson::oid::ObjectId;
use elearning_backend::config::mongo_conf::MongoConfig;
use elearning_backend::model::course::{Course, CoursePatch, MinimumSkill, DEFAULT_IMAGE};
use elearning_backend::repository::course_repo::{CourseRepository, MongoCourseRepository};
use elearning_backend::repository::mongo;
use elearning_backend::repository::repository_error::{RepositoryError, RepositoryResult};

async fn setup_course_repository() -> RepositoryResult<MongoCourseRepository> {
    let config = MongoConfig::from_test_env();
    let db = mongo::connect(&config)
        .await
        .map_err(|e| RepositoryError::database(format!("Failed to connect: {}", e)))?;
    mongo::ensure_indexes(&db).await?;
    Ok(MongoCourseRepository::new(&db))
}

#[tokio::test]
#[ignore = "needs a running MongoDB on localhost:27017"]
async fn test_course_repository_workflow() {
    let course_repo = setup_course_repository().await.expect("Failed to setup course repository");
    let instructor = ObjectId::new();
    let student = ObjectId::new();

    let course = Course {
        id: None,
        title: "Repository workflow".to_string(),
        description: "Exercises the Mongo course repository".to_string(),
        weeks: 3,
        tuition: 0.0,
        minimum_skill: MinimumSkill::Advanced,
        scholarship_available: false,
        is_free: true,
        image: DEFAULT_IMAGE.to_string(),
        category: ObjectId::new(),
        instructor,
        enrolled_students: Vec::new(),
        reviews: Vec::new(),
        rating: 0.0,
        num_reviews: 0,
        created_at: None,
    };

    let inserted = course_repo.insert(course).await.expect("Failed to insert course");
    let id = inserted.id.expect("id assigned on insert");
    assert!(inserted.created_at.is_some());
    assert_eq!(course_repo.count_by_instructor(&instructor).await.unwrap(), 1);

    let patch = CoursePatch { title: Some("Renamed".to_string()), weeks: Some(5), ..Default::default() };
    let updated = course_repo.update(&id, patch).await.unwrap().expect("course exists");
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.weeks, 5);
    assert_eq!(updated.instructor, instructor);

    // conditional push: second attempt matches nothing
    let enrolled = course_repo.enroll_student(&id, &student).await.unwrap().expect("first enroll");
    assert_eq!(enrolled.enrolled_students, vec![student]);
    assert!(course_repo.enroll_student(&id, &student).await.unwrap().is_none());
    assert!(course_repo.enroll_student(&ObjectId::new(), &student).await.unwrap().is_none());

    let owned = course_repo.list_by_instructor(&instructor).await.unwrap();
    assert_eq!(owned.len(), 1);

    assert!(course_repo.delete(&id).await.unwrap());
    assert!(!course_repo.delete(&id).await.unwrap());
    assert!(course_repo.find_by_id(&id).await.unwrap().is_none());
}
