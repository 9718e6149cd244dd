//! 關聯式資料表與圖節點標籤的對應。
//!
//! 每張表的每一列都會成為一個帶標籤的節點，屬性依 `SELECT *` 的欄位順序命名。

/// 單一資料表到節點標籤的對應
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableMapping {
    pub table: &'static str,
    pub label: &'static str,
    pub properties: &'static [&'static str],
}

impl TableMapping {
    pub fn select_all_sql(&self) -> String {
        format!("SELECT * FROM {}", self.table)
    }

    /// 產生 `CREATE (:Label {prop: $prop, ...})`
    pub fn create_cypher(&self) -> String {
        let props = self
            .properties
            .iter()
            .map(|p| format!("{p}: ${p}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE (:{} {{{}}})", self.label, props)
    }

    pub fn arity(&self) -> usize {
        self.properties.len()
    }
}

pub static UNIVERSITY_TABLES: [TableMapping; 11] = [
    TableMapping {
        table: "advisor",
        label: "Advisor",
        properties: &["sid", "iid"],
    },
    TableMapping {
        table: "classroom",
        label: "Classroom",
        properties: &["building", "roomNumber", "capacity"],
    },
    TableMapping {
        table: "course",
        label: "Course",
        properties: &["courseId", "title", "deptName", "credits"],
    },
    TableMapping {
        table: "department",
        label: "Department",
        properties: &["deptName", "building", "budget"],
    },
    TableMapping {
        table: "instructor",
        label: "Instructor",
        properties: &["id", "name", "deptName", "salary"],
    },
    TableMapping {
        table: "prereq",
        label: "Prereq",
        properties: &["courseId", "prereqId"],
    },
    TableMapping {
        table: "section",
        label: "Section",
        properties: &[
            "courseId",
            "secId",
            "semester",
            "year",
            "building",
            "roomNumber",
            "timeSlotId",
        ],
    },
    TableMapping {
        table: "student",
        label: "Student",
        properties: &["id", "name", "deptName", "totCred"],
    },
    TableMapping {
        table: "takes",
        label: "Takes",
        properties: &["id", "courseId", "secId", "semester", "year", "grade"],
    },
    TableMapping {
        table: "teaches",
        label: "Teaches",
        properties: &["id", "courseId", "secId", "semester", "year"],
    },
    TableMapping {
        table: "time_slot",
        label: "TimeSlot",
        properties: &["timeSlotId", "day", "startHr", "startMin", "endHr", "endMin"],
    },
];

pub fn find_mapping(table: &str) -> Option<&'static TableMapping> {
    UNIVERSITY_TABLES.iter().find(|m| m.table == table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_cypher_for_course() {
        let course = find_mapping("course").unwrap();
        assert_eq!(
            course.create_cypher(),
            "CREATE (:Course {courseId: $courseId, title: $title, deptName: $deptName, credits: $credits})"
        );
        assert_eq!(course.select_all_sql(), "SELECT * FROM course");
    }

    #[test]
    fn test_all_eleven_tables_are_mapped() {
        let tables: Vec<&str> = UNIVERSITY_TABLES.iter().map(|m| m.table).collect();
        assert_eq!(
            tables,
            vec![
                "advisor",
                "classroom",
                "course",
                "department",
                "instructor",
                "prereq",
                "section",
                "student",
                "takes",
                "teaches",
                "time_slot"
            ]
        );
        assert_eq!(find_mapping("time_slot").unwrap().label, "TimeSlot");
        assert_eq!(find_mapping("section").unwrap().arity(), 7);
        assert!(find_mapping("grades").is_none());
    }
}
