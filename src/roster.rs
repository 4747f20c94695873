use crate::model::{Class, Student};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Time-ordered unique id. Later calls sort after earlier ones.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// Every class with its enrolled students, in storage order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    classes: Vec<Class>,
}

impl Roster {
    pub fn new(classes: Vec<Class>) -> Self {
        Self { classes }
    }

    /// Sample data written on first run.
    pub fn seed() -> Self {
        fn student(id: &str, name: &str, roll: &str) -> Student {
            Student {
                id: id.to_string(),
                name: name.to_string(),
                roll_number: roll.to_string(),
            }
        }
        Self::new(vec![
            Class {
                id: "cs101".to_string(),
                name: "B.Tech Computer Science".to_string(),
                subject: "Introduction to Programming".to_string(),
                students: vec![
                    student("1", "Ahmed Ali", "CS-2024-001"),
                    student("2", "Fatima Khan", "CS-2024-002"),
                    student("3", "Hassan Ahmed", "CS-2024-003"),
                    student("4", "Ayesha Malik", "CS-2024-004"),
                    student("5", "Omar Sheikh", "CS-2024-005"),
                ],
            },
            Class {
                id: "law201".to_string(),
                name: "LLB Law".to_string(),
                subject: "Constitutional Law".to_string(),
                students: vec![
                    student("6", "Sara Hussain", "LAW-2024-001"),
                    student("7", "Ali Raza", "LAW-2024-002"),
                    student("8", "Zainab Tariq", "LAW-2024-003"),
                    student("9", "Bilal Ahmad", "LAW-2024-004"),
                ],
            },
        ])
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class(&self, class_id: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == class_id)
    }

    fn class_mut(&mut self, class_id: &str) -> Option<&mut Class> {
        self.classes.iter_mut().find(|c| c.id == class_id)
    }

    /// Appends a class with no students. Returns `None` (and changes nothing)
    /// when either field is blank.
    pub fn create_class(&mut self, name: &str, subject: &str) -> Option<String> {
        let name = non_empty(name)?;
        let subject = non_empty(subject)?;
        let id = new_id();
        self.classes.push(Class {
            id: id.clone(),
            name,
            subject,
            students: Vec::new(),
        });
        Some(id)
    }

    pub fn delete_class(&mut self, class_id: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c.id != class_id);
        self.classes.len() != before
    }

    /// Enrolls a student at the end of the class list. Blank fields or an
    /// unknown class are a no-op.
    pub fn add_student(
        &mut self,
        class_id: &str,
        name: &str,
        roll_number: &str,
    ) -> Option<String> {
        let name = non_empty(name)?;
        let roll_number = non_empty(roll_number)?;
        let class = self.class_mut(class_id)?;
        let id = new_id();
        class.students.push(Student {
            id: id.clone(),
            name,
            roll_number,
        });
        Some(id)
    }

    pub fn delete_student(&mut self, class_id: &str, student_id: &str) -> bool {
        let Some(class) = self.class_mut(class_id) else {
            return false;
        };
        let before = class.students.len();
        class.students.retain(|s| s.id != student_id);
        class.students.len() != before
    }
}
