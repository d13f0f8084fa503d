//! End-to-end roster flows over a real store

use std::sync::{Arc, Barrier};
use std::thread;

use classhub_core::core_classroom::{
    ClassroomManager, ClassroomSqlStore, ClassroomVisibility, MembershipManager, NewClassroom,
    NewUser, RosterManager, User, UserManager, UserRole,
};

fn manager() -> RosterManager {
    RosterManager::new(ClassroomSqlStore::memory().unwrap())
}

fn create_user(manager: &RosterManager, email: &str, name: &str, role: UserRole) -> User {
    manager
        .create_user(NewUser {
            email: email.to_string(),
            name: name.to_string(),
            role,
        })
        .unwrap()
}

#[test]
fn full_join_leave_rejoin_cycle() {
    let manager = manager();

    let educator = create_user(&manager, "edu@example.com", "Ms. Frizzle", UserRole::Educator);
    let student = create_user(&manager, "stu@example.com", "Arnold", UserRole::Student);

    let classroom = manager
        .create_classroom(NewClassroom {
            name: "Science".to_string(),
            description: Some("Field trips included".to_string()),
            educator_id: educator.id,
            visibility: ClassroomVisibility::Private,
        })
        .unwrap();

    // Join by invite code
    let membership = manager
        .join_classroom(&classroom.invite_code, student.id)
        .unwrap()
        .expect("valid invite code should create a membership");
    assert_eq!(membership.classroom_id, classroom.id);

    let roster = manager.classroom_members(classroom.id).unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].id, student.id);
    assert_eq!(roster[0].name, "Arnold");

    // The student sees exactly one classroom
    let classrooms = manager.classrooms_by_student(student.id).unwrap();
    assert_eq!(classrooms.len(), 1);
    assert_eq!(classrooms[0].id, classroom.id);

    // Leave empties the roster
    assert!(manager.leave_classroom(classroom.id, student.id).unwrap());
    assert!(manager.classroom_members(classroom.id).unwrap().is_empty());
    assert!(manager
        .classrooms_by_student(student.id)
        .unwrap()
        .is_empty());

    // The state machine is re-enterable
    let rejoined = manager
        .join_classroom(&classroom.invite_code, student.id)
        .unwrap();
    assert!(rejoined.is_some());
    assert_eq!(manager.classroom_members(classroom.id).unwrap().len(), 1);
}

#[test]
fn concurrent_joins_yield_exactly_one_membership() {
    // File-backed store so every thread gets its own pooled connection
    let dir = tempfile::tempdir().unwrap();
    let store = ClassroomSqlStore::open(dir.path().join("classhub.db")).unwrap();
    let manager = Arc::new(RosterManager::new(store));

    let educator = create_user(&manager, "edu@example.com", "Ms. Frizzle", UserRole::Educator);
    let student = create_user(&manager, "stu@example.com", "Arnold", UserRole::Student);
    let classroom = manager
        .create_classroom(NewClassroom {
            name: "Science".to_string(),
            description: None,
            educator_id: educator.id,
            visibility: ClassroomVisibility::Private,
        })
        .unwrap();

    const ATTEMPTS: usize = 8;
    let barrier = Arc::new(Barrier::new(ATTEMPTS));

    let handles: Vec<_> = (0..ATTEMPTS)
        .map(|_| {
            let manager = manager.clone();
            let barrier = barrier.clone();
            let invite_code = classroom.invite_code.clone();
            let student_id = student.id;
            thread::spawn(move || {
                barrier.wait();
                manager.join_classroom(&invite_code, student_id).unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Exactly one join wins; the rest observe the existing membership
    let winners = results.iter().filter(|r| r.is_some()).count();
    assert_eq!(winners, 1);
    assert_eq!(manager.classroom_members(classroom.id).unwrap().len(), 1);
}
