use quill::Entity;

#[derive(Entity)]
pub struct Student {
    #[quill(id)]
    pub id: i32,
    pub name: String,
    #[quill(many_to_many(mapped_by = "students"))]
    pub courses: Vec<Course>,
}

#[derive(Entity)]
pub struct Course {
    #[quill(id)]
    pub id: i32,
    pub title: String,
    #[quill(many_to_many)]
    pub students: Vec<Student>,
}

#[derive(Entity)]
pub struct Teacher {
    #[quill(id)]
    pub id: i32,
    pub name: String,
    #[quill(many_to_many, join_table(name = "teaching", join_column = "teacher", inverse_join_column = "course"))]
    pub courses: std::collections::BTreeSet<Course>,
    #[quill(one_to_one(target = Teacher))]
    pub mentor_id: Option<i32>,
}
