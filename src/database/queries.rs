pub static SELECT_BOARDS: &str = "select id, name, description from boards order by name";
pub static SELECT_BOARD: &str = "select id, name, description from boards where id = ?";

pub static SELECT_TOPIC: &str = "select t.id, t.board, b.name, t.title, t.starter, t.created_at, t.last_updated, t.views from topics t join boards b on b.id = t.board where t.board = ? and t.id = ?";
pub static COUNT_TOPICS: &str = "select count(*) from topics where board = ?";
// replies = post count minus the opening post
pub static SELECT_TOPICS_PAGE: &str = "select t.id, t.title, t.starter, t.last_updated, t.views, (select count(*) from posts p where p.topic = t.id) - 1 from topics t where t.board = ? order by t.last_updated desc, t.id desc limit ? offset ?";
pub static INSERT_TOPIC: &str = "insert into topics(board, title, starter, created_at, last_updated) values (?, ?, ?, ?, ?)";
pub static TOUCH_TOPIC: &str = "update topics set last_updated = ? where id = ?";
pub static BUMP_VIEWS: &str = "update topics set views = views + 1 where id = ?";

pub static COUNT_POSTS: &str = "select count(*) from posts where topic = ?";
pub static SELECT_POSTS_PAGE: &str = "select id, topic, message, created_by, created_at, updated_by, updated_at from posts where topic = ? order by created_at asc, id asc limit ? offset ?";
pub static SELECT_POSTS_ALL: &str = "select id, topic, message, created_by, created_at, updated_by, updated_at from posts where topic = ? order by created_at asc, id asc";
pub static INSERT_POST: &str = "insert into posts(topic, message, created_by, created_at) values (?, ?, ?, ?)";
pub static SELECT_OWN_POST: &str = "select p.id, p.topic, t.board, t.title, p.message from posts p join topics t on t.id = p.topic where p.id = ? and p.created_by = ?";
pub static UPDATE_OWN_POST: &str = "update posts set message = ?, updated_by = ?, updated_at = ? where id = ? and created_by = ?";
