pub(crate) const LOREM_WORDS: &[&str] = &[
    "a", "ab", "accusamus", "accusantium", "ad", "adipisci", "alias", "aliquam", "aliquid",
    "amet", "animi", "aperiam", "architecto", "asperiores", "aspernatur", "assumenda", "at",
    "atque", "aut", "autem", "beatae", "blanditiis", "commodi", "consectetur", "consequatur",
    "consequuntur", "corporis", "corrupti", "culpa", "cum", "cumque", "cupiditate", "debitis",
    "delectus", "deleniti", "deserunt", "dicta", "dignissimos", "distinctio", "dolor",
    "dolore", "dolorem", "doloremque", "dolores", "doloribus", "dolorum", "ducimus", "ea",
    "eaque", "earum", "eius", "eligendi", "enim", "eos", "error", "esse", "est", "et", "eum",
    "eveniet", "ex", "excepturi", "exercitationem", "expedita", "explicabo", "facere",
    "facilis", "fuga", "fugiat", "fugit", "harum", "hic", "id", "illo", "illum", "impedit",
    "in", "incidunt", "inventore", "ipsa", "ipsam", "ipsum", "iste", "itaque", "iure",
    "iusto", "labore", "laboriosam", "laborum", "laudantium", "libero", "magnam", "magni",
    "maiores", "maxime", "minima", "minus", "modi", "molestiae", "molestias", "mollitia",
    "nam", "natus", "necessitatibus", "nemo", "neque", "nesciunt", "nihil", "nisi", "nobis",
    "non", "nostrum", "nulla", "numquam", "obcaecati", "odio", "odit", "officia", "officiis",
    "omnis", "optio", "pariatur", "perferendis", "perspiciatis", "placeat", "porro",
    "possimus", "praesentium", "provident", "quae", "quaerat", "quam", "quas", "quasi", "qui",
    "quia", "quibusdam", "quidem", "quis", "quisquam", "quo", "quod", "quos", "ratione",
    "recusandae", "reiciendis", "rem", "repellat", "repellendus", "reprehenderit",
    "repudiandae", "rerum", "saepe", "sapiente", "sed", "sequi", "similique", "sint", "sit",
    "soluta", "sunt", "suscipit", "tempora", "tempore", "temporibus", "tenetur", "totam",
    "ullam", "unde", "ut", "vel", "velit", "veniam", "veritatis", "vero", "vitae",
    "voluptas", "voluptate", "voluptatem", "voluptates", "voluptatibus", "voluptatum",
];

pub(crate) const FIRST_NAMES_MALE: &[&str] = &[
    "Aaron", "Adam", "Adrian", "Alan", "Albert", "Alex", "Andrew", "Anthony", "Arthur",
    "Benjamin", "Brandon", "Brian", "Bruce", "Carl", "Charles", "Christopher", "Daniel",
    "David", "Dennis", "Douglas", "Edward", "Eric", "Ethan", "Frank", "Gary", "George",
    "Gregory", "Harold", "Henry", "Jack", "Jacob", "James", "Jason", "Jeffrey", "John",
    "Jonathan", "Joseph", "Joshua", "Justin", "Keith", "Kenneth", "Kevin", "Larry", "Mark",
    "Matthew", "Michael", "Nathan", "Nicholas", "Patrick", "Paul", "Peter", "Raymond",
    "Richard", "Robert", "Ryan", "Samuel", "Scott", "Stephen", "Thomas", "Timothy", "Walter",
    "William",
];

pub(crate) const FIRST_NAMES_FEMALE: &[&str] = &[
    "Abigail", "Alice", "Amanda", "Amy", "Angela", "Anna", "Ashley", "Barbara", "Betty",
    "Brenda", "Carol", "Catherine", "Christine", "Cynthia", "Deborah", "Diana", "Donna",
    "Dorothy", "Elizabeth", "Emily", "Emma", "Evelyn", "Frances", "Grace", "Hannah", "Helen",
    "Jacqueline", "Janet", "Jennifer", "Jessica", "Joan", "Julia", "Julie", "Karen",
    "Katherine", "Kathleen", "Kelly", "Laura", "Linda", "Lisa", "Margaret", "Maria", "Marie",
    "Martha", "Mary", "Megan", "Melissa", "Michelle", "Nancy", "Nicole", "Olivia", "Pamela",
    "Rachel", "Rebecca", "Ruth", "Sandra", "Sarah", "Sharon", "Sophia", "Stephanie", "Susan",
    "Victoria",
];

pub(crate) const LAST_NAMES: &[&str] = &[
    "Adams", "Allen", "Anderson", "Bailey", "Baker", "Barnes", "Bell", "Bennett", "Brooks",
    "Brown", "Butler", "Campbell", "Carter", "Clark", "Collins", "Cook", "Cooper", "Cox",
    "Davis", "Edwards", "Evans", "Fisher", "Flores", "Foster", "Garcia", "Gomez", "Gonzalez",
    "Gray", "Green", "Hall", "Harris", "Hayes", "Hill", "Howard", "Hughes", "Jackson",
    "James", "Jenkins", "Johnson", "Jones", "Kelly", "King", "Lee", "Lewis", "Long", "Lopez",
    "Martin", "Martinez", "Miller", "Mitchell", "Moore", "Morgan", "Morris", "Murphy",
    "Nelson", "Parker", "Perez", "Perry", "Peterson", "Phillips", "Powell", "Price",
    "Reed", "Richardson", "Rivera", "Roberts", "Robinson", "Rogers", "Ross", "Russell",
    "Sanders", "Scott", "Smith", "Stewart", "Sullivan", "Taylor", "Thomas", "Thompson",
    "Torres", "Turner", "Walker", "Ward", "Watson", "White", "Williams", "Wilson", "Wood",
    "Wright", "Young",
];
