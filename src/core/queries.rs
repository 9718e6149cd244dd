//! 載入後執行的十個唯讀分析查詢與其輸出格式。

use crate::domain::model::GraphRecord;

/// 查詢結果的呈現方式
#[derive(Debug, Clone, Copy)]
pub enum Rendering {
    /// 每筆紀錄一行 `Label: value, ...`
    Listing {
        header: Option<&'static str>,
        fields: &'static [(&'static str, &'static str)],
        empty: &'static str,
    },
    /// 於用戶端計算某數值欄位的平均
    Average {
        column: &'static str,
        subject: &'static str,
        empty: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct AnalyticalQuery {
    pub number: u8,
    pub description: &'static str,
    pub cypher: &'static str,
    pub rendering: Rendering,
}

impl AnalyticalQuery {
    /// 查詢需要讀取的欄位
    pub fn columns(&self) -> Vec<&'static str> {
        match self.rendering {
            Rendering::Listing { fields, .. } => fields.iter().map(|(column, _)| *column).collect(),
            Rendering::Average { column, .. } => vec![column],
        }
    }

    pub fn render(&self, records: &[GraphRecord]) -> Vec<String> {
        match self.rendering {
            Rendering::Listing {
                header,
                fields,
                empty,
            } => {
                if records.is_empty() {
                    return vec![empty.to_string()];
                }
                let mut lines = Vec::with_capacity(records.len() + 1);
                if let Some(header) = header {
                    lines.push(header.to_string());
                }
                for record in records {
                    let line = fields
                        .iter()
                        .map(|(column, label)| format!("{}: {}", label, record.get(column)))
                        .collect::<Vec<_>>()
                        .join(", ");
                    lines.push(line);
                }
                lines
            }
            Rendering::Average {
                column,
                subject,
                empty,
            } => {
                let mut sum = 0.0;
                let mut count = 0usize;
                for record in records {
                    match record.get(column).as_f64() {
                        Some(value) => {
                            sum += value;
                            count += 1;
                        }
                        None => tracing::warn!(
                            "⚠️ Q{}: skipping non-numeric {} value: {}",
                            self.number,
                            column,
                            record.get(column)
                        ),
                    }
                }
                if count == 0 {
                    vec![empty.to_string()]
                } else {
                    vec![format!("{}R${:.2}", subject, sum / count as f64)]
                }
            }
        }
    }
}

pub static ANALYTICAL_QUERIES: [AnalyticalQuery; 10] = [
    AnalyticalQuery {
        number: 1,
        description: "Courses offered by a given department",
        cypher: "MATCH (c:Course {deptName: 'Music'})
RETURN c.courseId AS courseId, c.title AS title, c.deptName AS deptName, c.credits AS credits",
        rendering: Rendering::Listing {
            header: Some("Courses offered by the 'Music' department:"),
            fields: &[
                ("courseId", "Course ID"),
                ("title", "Title"),
                ("deptName", "Department"),
                ("credits", "Credits"),
            ],
            empty: "No courses found for the 'Music' department.",
        },
    },
    AnalyticalQuery {
        number: 2,
        description: "Sections of a course in a given semester",
        cypher: "MATCH (c:Course {title: 'Computational Biology'})-[:OFFERED_IN]->(s:Section {semester: 'Spring'})
RETURN c.courseId AS courseId, c.title AS courseTitle, s.secId AS sectionId, s.year AS year, s.building AS building, s.roomNumber AS roomNumber, s.timeSlotId AS timeSlotId",
        rendering: Rendering::Listing {
            header: Some("Sections of course 'Computational Biology' in semester 'Spring':"),
            fields: &[
                ("courseId", "Course ID"),
                ("courseTitle", "Course Title"),
                ("sectionId", "Section ID"),
                ("year", "Year"),
                ("building", "Building"),
                ("roomNumber", "Room Number"),
                ("timeSlotId", "Time Slot ID"),
            ],
            empty: "No sections found for course 'Computational Biology' in semester 'Spring'.",
        },
    },
    AnalyticalQuery {
        number: 3,
        description: "Students enrolled in a given course",
        cypher: "MATCH (s:Student)-[:TAKES]->(sec:Section)-[:OFFERED_IN]->(c:Course {title: 'Computational Biology'})
RETURN s.id AS studentId, s.name AS studentName, c.courseId AS courseId, c.title AS courseTitle",
        rendering: Rendering::Listing {
            header: Some("Students enrolled in course 'Computational Biology':"),
            fields: &[
                ("studentId", "Student ID"),
                ("studentName", "Student Name"),
                ("courseId", "Course ID"),
                ("courseTitle", "Course Title"),
            ],
            empty: "No students found for course 'Computational Biology'.",
        },
    },
    AnalyticalQuery {
        number: 4,
        description: "Average instructor salary of a given department",
        cypher: "MATCH (s:Instructor)
WHERE s.deptName = 'Biology'
RETURN s.salary AS salary",
        rendering: Rendering::Average {
            column: "salary",
            subject: "Average salary of instructors in the 'Biology' department: ",
            empty: "No instructors found in the 'Biology' department.",
        },
    },
    AnalyticalQuery {
        number: 5,
        description: "Total credits earned by a given student",
        cypher: "MATCH (s:Student {name: 'Shankar'})-[:TAKES]->(sec:Section)-[:OFFERED_IN]->(c:Course)
RETURN s.id AS studentId, s.name AS studentName, SUM(c.credits) AS totalCredits",
        rendering: Rendering::Listing {
            header: None,
            fields: &[
                ("studentId", "Student ID"),
                ("studentName", "Student Name"),
                ("totalCredits", "Total Credits"),
            ],
            empty: "No data found for student 'Shankar'.",
        },
    },
    AnalyticalQuery {
        number: 6,
        description: "Sections taught by an instructor in a given semester",
        cypher: "MATCH (i:Instructor {name: 'Zhang'})-[:TEACHES]->(sec:Section {semester: 'Spring'})-[:OFFERED_IN]->(c:Course)
RETURN c.courseId AS courseId, c.title AS courseTitle, sec.secId AS sectionId, sec.semester AS semester, sec.year AS year",
        rendering: Rendering::Listing {
            header: None,
            fields: &[
                ("courseId", "Course ID"),
                ("courseTitle", "Course Title"),
                ("sectionId", "Section ID"),
                ("semester", "Semester"),
                ("year", "Year"),
            ],
            empty: "No data found for instructor 'Zhang' in semester 'Spring'.",
        },
    },
    AnalyticalQuery {
        number: 7,
        description: "Students advised by a given instructor",
        cypher: "MATCH (i:Instructor {name: 'Mozart'})<-[:ADVISOR]-(s:Student)
RETURN s.id AS studentId, s.name AS studentName",
        rendering: Rendering::Listing {
            header: Some("Students advised by instructor 'Mozart':"),
            fields: &[("studentId", "Student ID"), ("studentName", "Student Name")],
            empty: "No students found with instructor 'Mozart' as advisor.",
        },
    },
    AnalyticalQuery {
        number: 8,
        description: "Classrooms without an associated section",
        cypher: "MATCH (c:Classroom)
WHERE NOT EXISTS {
    MATCH (c)-[:CLASSROOM_SECTION]->(:Section)
}
RETURN c.building AS building, c.roomNumber AS roomNumber, c.capacity AS capacity",
        rendering: Rendering::Listing {
            header: Some("Classrooms without an associated section:"),
            fields: &[
                ("building", "Building"),
                ("roomNumber", "Room Number"),
                ("capacity", "Capacity"),
            ],
            empty: "No classrooms found without an associated section.",
        },
    },
    AnalyticalQuery {
        number: 9,
        description: "All prerequisites of a given course",
        cypher: "MATCH (c:Course {title: 'Comp. Sci.'})-[:PREREQ*]->(prerequisite:Course)
RETURN prerequisite.courseId AS courseId, prerequisite.title AS title",
        rendering: Rendering::Listing {
            header: Some("Prerequisites of course 'Comp. Sci.':"),
            fields: &[("courseId", "Course ID"), ("title", "Title")],
            empty: "No prerequisites found for course 'Comp. Sci.'.",
        },
    },
    AnalyticalQuery {
        number: 10,
        description: "Number of advisees per instructor",
        cypher: "MATCH (professor:Instructor)-[:ADVISOR]->(student:Student)
RETURN professor.name AS professor, COUNT(student) AS num_students",
        rendering: Rendering::Listing {
            header: Some("Number of advisees per instructor:"),
            fields: &[("professor", "Professor"), ("num_students", "Number of students")],
            empty: "No instructors with advisees found.",
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Value;
    use std::collections::HashMap;

    fn record(pairs: &[(&str, Value)]) -> GraphRecord {
        GraphRecord {
            data: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_listing_with_header() {
        let q1 = &ANALYTICAL_QUERIES[0];
        let lines = q1.render(&[record(&[
            ("courseId", Value::from("MU-199")),
            ("title", Value::from("Music Video Production")),
            ("deptName", Value::from("Music")),
            ("credits", Value::Float(3.0)),
        ])]);

        assert_eq!(
            lines,
            vec![
                "Courses offered by the 'Music' department:".to_string(),
                "Course ID: MU-199, Title: Music Video Production, Department: Music, Credits: 3.0"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_listing_without_header_and_empty() {
        let q5 = &ANALYTICAL_QUERIES[4];
        assert_eq!(q5.render(&[]), vec!["No data found for student 'Shankar'."]);

        let lines = q5.render(&[record(&[
            ("studentId", Value::from("12345")),
            ("studentName", Value::from("Shankar")),
            ("totalCredits", Value::Float(14.0)),
        ])]);
        assert_eq!(
            lines,
            vec!["Student ID: 12345, Student Name: Shankar, Total Credits: 14.0"]
        );
    }

    #[test]
    fn test_missing_column_renders_null() {
        let q7 = &ANALYTICAL_QUERIES[6];
        let lines = q7.render(&[record(&[("studentName", Value::from("Sanchez"))])]);
        assert_eq!(lines[1], "Student ID: null, Student Name: Sanchez");
    }

    #[test]
    fn test_average_salary() {
        let q4 = &ANALYTICAL_QUERIES[3];
        assert_eq!(q4.columns(), vec!["salary"]);

        let lines = q4.render(&[
            record(&[("salary", Value::Float(72000.0))]),
            record(&[("salary", Value::Int(60000))]),
            record(&[("salary", Value::Null)]),
        ]);
        assert_eq!(
            lines,
            vec!["Average salary of instructors in the 'Biology' department: R$66000.00"]
        );

        assert_eq!(
            q4.render(&[]),
            vec!["No instructors found in the 'Biology' department."]
        );
    }

    #[test]
    fn test_queries_are_numbered_in_order() {
        for (i, query) in ANALYTICAL_QUERIES.iter().enumerate() {
            assert_eq!(query.number as usize, i + 1);
            assert!(!query.columns().is_empty());
            assert!(query.cypher.contains("RETURN"));
        }
    }
}
