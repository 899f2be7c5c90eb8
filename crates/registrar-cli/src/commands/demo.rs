// crates/registrar-cli/src/commands/demo.rs
//
// `registrar demo`: walk a live daemon through a sample enrollment session:
// one student, two courses, two enrollments, a rejected duplicate, and both
// list queries.

use registrar_core::{Course, ErrorCode, Student};
use registrar_rpc::handlers::course::{
    ListStudentsForCourseRequest, ListStudentsForCourseResponse, RegisterCourseRequest,
    RegisterCourseResponse,
};
use registrar_rpc::handlers::enrollment::{EnrollRequest, EnrollResponse};
use registrar_rpc::handlers::student::{
    ListCoursesForStudentRequest, ListCoursesForStudentResponse, RegisterStudentRequest,
    RegisterStudentResponse,
};

use crate::output::{render_courses, render_students, OutputFormat};
use crate::rpc_client::{ClientError, RpcClient};

fn sample_student() -> Student {
    Student {
        id: "12345".to_string(),
        given_names: "Carlos".to_string(),
        surnames: "Montellano".to_string(),
        program: "Sistemas".to_string(),
    }
}

fn sample_courses() -> [Course; 2] {
    [
        Course {
            code: "INF101".to_string(),
            name: "Programación I".to_string(),
            instructor: "Ing. Pérez".to_string(),
        },
        Course {
            code: "INF202".to_string(),
            name: "Estructuras de Datos".to_string(),
            instructor: "Ing. Gómez".to_string(),
        },
    ]
}

fn enroll_request(student_id: &str, course_code: &str) -> EnrollRequest {
    EnrollRequest {
        student_id: student_id.to_string(),
        course_code: course_code.to_string(),
    }
}

/// Run the demo command.
pub async fn run(client: &RpcClient, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let student = sample_student();
    let student_id = student.id.clone();

    let resp: RegisterStudentResponse = client
        .call("student/register", &RegisterStudentRequest { student })
        .await?;
    println!("Student registered: {} ({})", resp.student.id, resp.student.full_name());

    let courses = sample_courses();
    for course in &courses {
        let resp: RegisterCourseResponse = client
            .call(
                "course/register",
                &RegisterCourseRequest {
                    course: course.clone(),
                },
            )
            .await?;
        println!("Course registered: {} ({})", resp.course.code, resp.course.name);
    }

    for course in &courses {
        let ack: EnrollResponse = client
            .call("enrollment/enroll", &enroll_request(&student_id, &course.code))
            .await?;
        println!("{}: {} -> {}", ack.message, student_id, course.code);
    }

    let duplicate: Result<EnrollResponse, ClientError> = client
        .call("enrollment/enroll", &enroll_request(&student_id, &courses[0].code))
        .await;
    match duplicate {
        Err(ClientError::Rpc(err)) if err.code == ErrorCode::AlreadyExists => {
            println!("Duplicate enrollment rejected as expected: {}", err);
        }
        Err(other) => return Err(other.into()),
        Ok(_) => return Err("duplicate enrollment was accepted".into()),
    }

    let resp: ListCoursesForStudentResponse = client
        .call(
            "student/courses",
            &ListCoursesForStudentRequest {
                student_id: student_id.clone(),
            },
        )
        .await?;
    println!();
    println!("Courses of student {}:", student_id);
    println!("{}", render_courses(&resp.courses, format));

    let resp: ListStudentsForCourseResponse = client
        .call(
            "course/students",
            &ListStudentsForCourseRequest {
                course_code: courses[0].code.clone(),
            },
        )
        .await?;
    println!();
    println!("Students of course {}:", courses[0].code);
    println!("{}", render_students(&resp.students, format));

    Ok(())
}
