mod common;

use common::{application, job, user, BackendState, MockBackend};
use remote_nomads::forms::auth_form::{ResetPasswordForm, SignupForm};
use remote_nomads::forms::profile_form::ProfileForm;
use remote_nomads::forms::user_form::UserForm;
use remote_nomads::forms::FormMode;
use remote_nomads::models::user::UserRole;
use remote_nomads::models::ResourceId;
use remote_nomads::services::dashboard_service::DashboardStats;
use remote_nomads::services::profile_service::CvUpload;
use remote_nomads::views::my_applications::ApplicationSort;
use serde_json::json;

#[tokio::test]
async fn profile_update_with_cv_goes_out_as_multipart() {
    let backend = MockBackend::spawn(BackendState {
        profile: json!({"name": "Lina Park", "email": "lina@nomads.io", "phone": null}),
        ..Default::default()
    })
    .await;
    let (app, _store, _notifier) = backend.app();

    let profile = app.profile_service.get().await.unwrap();
    let mut form = ProfileForm::from_profile(&profile);
    assert!(form.set("location", "Lisbon"));
    assert!(!form.set("favourite_colour", "teal"));

    let cv = CvUpload::new("lina.pdf", b"%PDF-1.4".to_vec());
    let saved = app
        .profile_service
        .update(&form.update, Some(cv))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(saved.location, "Lisbon");
    assert_eq!(saved.cv_path.as_deref(), Some("uploads/cv.pdf"));
    let parts = backend.with(|s| s.profile_parts.clone());
    assert!(parts.contains(&("cv".to_string(), Some("lina.pdf".to_string()), 8)));
    assert!(parts.iter().any(|(name, file, _)| name == "name" && file.is_none()));
}

#[tokio::test]
async fn profile_with_bad_email_is_not_sent() {
    let backend = MockBackend::spawn(BackendState {
        profile: json!({"full_name": "Lina Park", "email": "lina@nomads.io"}),
        ..Default::default()
    })
    .await;
    let (app, _store, _notifier) = backend.app();

    let mut form = ProfileForm::default();
    form.set("email", "lina-at-nomads");
    assert!(form.validate().is_err());
    assert!(app.profile_service.update(&form.update, None).await.is_err());
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn user_crud_refetches_and_requires_password_on_create() {
    let backend = MockBackend::spawn(BackendState {
        users: vec![user(1, "Ada Admin", "admin@nomads.io", "admin")],
        ..Default::default()
    })
    .await;
    let (app, _store, notifier) = backend.app();
    let mut users = app.user_management();
    users.load().await;

    let mut form = UserForm {
        full_name: "Rita Recruiter".into(),
        email: "rita@nomads.io".into(),
        role: UserRole::Recruiter,
        ..UserForm::new()
    };
    assert!(!users.save(&form).await);
    assert_eq!(notifier.errors(), vec!["Password is required"]);
    assert_eq!(backend.count("POST", "/users"), 0);

    form.password = "hunter22".into();
    assert!(users.save(&form).await);
    users.set_search("recruiter");
    assert_eq!(users.visible().len(), 1);
    let rita = users.visible()[0].id.clone();

    let mut edit = UserForm::edit(users.find(&rita).unwrap());
    assert_eq!(edit.mode, FormMode::Edit(rita.clone()));
    edit.full_name = "Rita R.".into();
    assert!(users.save(&edit).await);
    assert_eq!(users.find(&rita).unwrap().full_name, "Rita R.");

    assert!(users.delete(&rita).await);
    assert!(users.find(&rita).is_none());
    assert_eq!(backend.count("GET", "/users"), 4);
}

#[tokio::test]
async fn signup_and_reset_surface_backend_messages() {
    let backend = MockBackend::spawn(BackendState::default()).await;
    let (app, _store, _notifier) = backend.app();

    let signup = SignupForm {
        full_name: "Noor".into(),
        email: "noor@nomads.io".into(),
        password: "secret1".into(),
        role: UserRole::Candidate,
    };
    let message = app.auth_service.register(signup.to_request()).await.unwrap();
    assert_eq!(message.as_deref(), Some("User registered successfully"));

    let taken = SignupForm {
        email: "taken@nomads.io".into(),
        ..signup
    };
    let err = app.auth_service.register(taken.to_request()).await.unwrap_err();
    assert_eq!(err.user_message(), "Email already registered");

    let reset = ResetPasswordForm {
        token: Some("good-token".into()),
        new_password: "brand-new".into(),
    };
    assert!(app.auth_service.reset_password(reset.to_request()).await.is_ok());

    let no_token = ResetPasswordForm {
        token: None,
        new_password: "brand-new".into(),
    };
    assert!(app.auth_service.reset_password(no_token.to_request()).await.is_err());
    assert_eq!(backend.count("POST", "/auth/reset-password"), 1);
}

#[tokio::test]
async fn dashboard_aggregates_three_collections() {
    let backend = MockBackend::spawn(BackendState {
        users: vec![
            user(1, "Ada", "admin@nomads.io", "admin"),
            user(2, "Sam", "sam@nomads.io", "candidate"),
        ],
        jobs: vec![
            job(1, "Rust Engineer", "Ferrous", "active"),
            job(2, "Designer", "Pixel", "draft"),
            job(3, "SRE", "Orbit", "active"),
        ],
        applications: vec![
            application(1, "Sam", "sam@nomads.io", "Rust Engineer", "pending"),
            application(2, "Kai", "kai@nomads.io", "Rust Engineer", "reviewed"),
        ],
        ..Default::default()
    })
    .await;
    let (app, _store, _notifier) = backend.app();
    let mut dashboard = app.admin_dashboard();

    assert!(dashboard.load().await);
    assert_eq!(
        dashboard.stats(),
        DashboardStats {
            total_users: 2,
            active_jobs: 2,
            applications: 2,
            fill_rate: 67,
        }
    );
}

#[tokio::test]
async fn my_applications_export_ignores_the_filter() {
    let mut rows = vec![
        application(1, "Sam", "sam@nomads.io", "Rust Engineer", "accepted"),
        application(2, "Sam", "sam@nomads.io", "", "pending"),
    ];
    rows[0]["company"] = json!("Ferrous");
    let backend = MockBackend::spawn(BackendState {
        applications: rows,
        ..Default::default()
    })
    .await;
    let (app, _store, notifier) = backend.app();
    let mut mine = app.my_applications();
    assert!(mine.load().await);

    mine.set_search("rust");
    mine.set_sort(ApplicationSort::Title);
    assert_eq!(mine.visible().len(), 1);

    let csv = String::from_utf8(mine.export_csv().unwrap()).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines[0], "Job Title,Company,Status,Applied Date,Application ID");
    assert_eq!(lines.len(), 3);
    assert!(lines.contains(&"Rust Engineer,Ferrous,accepted,2024-05-02,1"));
    assert!(lines.contains(&"N/A,,pending,2024-05-02,2"));
    assert_eq!(notifier.last().unwrap().message, "Applications exported successfully");

    let stats = mine.stats();
    assert_eq!((stats.total, stats.active, stats.success_rate), (2, 1, 50));
    assert!(mine.visible().iter().all(|a| a.id != ResourceId::from("2")));
}
